//! In-memory georeferenced rasters.
//!
//! A [`Grid`] is the decoded form of a height model: a north-up,
//! square-celled raster with one or more bands. Grids can be read
//! from ESRI ASCII grid (`.asc`) files and stacked so that each
//! survey year becomes one band of a multi-band raster.

use crate::{BandValues, DhmError, C};
use geo::geometry::{Coord, Rect};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Upper-left corner of the upper-left cell.
    origin: Coord<C>,

    /// Cell edge length in map units.
    cell_size: C,

    /// Number of (rows, columns) in this grid.
    dimensions: (usize, usize),

    /// Sample value meaning "no data", if any.
    nodata: Option<f32>,

    /// One sample buffer per band, row-major starting at the top row.
    bands: Vec<Box<[f32]>>,
}

impl Grid {
    pub fn new(
        origin: Coord<C>,
        cell_size: C,
        dimensions: (usize, usize),
        nodata: Option<f32>,
        bands: Vec<Box<[f32]>>,
    ) -> Result<Self, DhmError> {
        let (rows, cols) = dimensions;
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(DhmError::Grid(format!("invalid cell size {cell_size}")));
        }
        if rows == 0 || cols == 0 || bands.is_empty() {
            return Err(DhmError::Grid("empty grid".to_owned()));
        }
        if let Some(band) = bands.iter().find(|band| band.len() != rows * cols) {
            return Err(DhmError::Grid(format!(
                "expected {} samples, found {}",
                rows * cols,
                band.len()
            )));
        }
        Ok(Self {
            origin,
            cell_size,
            dimensions,
            nodata,
            bands,
        })
    }

    /// Returns a single-band grid read from the ESRI ASCII grid file
    /// at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DhmError> {
        debug!("loading grid {:?}", path.as_ref());
        let file = BufReader::new(File::open(path)?);
        Self::from_ascii(file)
    }

    /// Parses an ESRI ASCII grid.
    ///
    /// Both the `xllcorner`/`yllcorner` and `xllcenter`/`yllcenter`
    /// header variants are accepted; `NODATA_value` is optional.
    pub fn from_ascii<R: Read>(mut rdr: R) -> Result<Self, DhmError> {
        let mut text = String::new();
        rdr.read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace().peekable();

        let mut header = AsciiHeader::default();
        while let Some(key) = tokens.next_if(|t| t.starts_with(|c: char| c.is_ascii_alphabetic())) {
            let raw = tokens
                .next()
                .ok_or_else(|| DhmError::Grid(format!("missing value for {key}")))?;
            let value: C = raw
                .parse()
                .map_err(|_| DhmError::Grid(format!("invalid value {raw:?} for {key}")))?;
            header.set(key, value)?;
        }
        let (dimensions, lower_left, cell_size) = header.resolve()?;

        let samples = tokens
            .map(|raw| {
                raw.parse::<f32>()
                    .map_err(|_| DhmError::Grid(format!("invalid sample {raw:?}")))
            })
            .collect::<Result<Vec<f32>, DhmError>>()?;

        #[allow(clippy::cast_precision_loss)]
        let origin = Coord {
            x: lower_left.x,
            y: lower_left.y + dimensions.0 as C * cell_size,
        };

        #[allow(clippy::cast_possible_truncation)]
        let nodata = header.nodata.map(|value| value as f32);
        Self::new(
            origin,
            cell_size,
            dimensions,
            nodata,
            vec![samples.into_boxed_slice()],
        )
    }

    /// Combines same-shaped grids into one grid with a band per input
    /// band, in order.
    pub fn stack(grids: Vec<Grid>) -> Result<Self, DhmError> {
        let mut grids = grids.into_iter();
        let mut stacked = grids.next().ok_or(DhmError::EmptyCatalog)?;
        for (i, grid) in grids.enumerate() {
            if grid.dimensions != stacked.dimensions
                || grid.origin != stacked.origin
                || grid.cell_size != stacked.cell_size
            {
                return Err(DhmError::GridShape(format!(
                    "grid {} is {:?} at {:?}, expected {:?} at {:?}",
                    i + 1,
                    grid.dimensions,
                    grid.origin,
                    stacked.dimensions,
                    stacked.origin
                )));
            }
            // Bands keep their own nodata by being rewritten to NaN.
            let bands = grid.bands_with_nan();
            if stacked.nodata.is_some() {
                stacked.bands = stacked.bands_with_nan();
                stacked.nodata = None;
            }
            stacked.bands.extend(bands);
        }
        Ok(stacked)
    }

    /// Returns a grid containing only the given 1-based `bands`.
    pub fn select_bands(self, bands: &[usize]) -> Result<Self, DhmError> {
        let count = self.bands.len();
        let selected = bands
            .iter()
            .map(|&band| {
                band.checked_sub(1)
                    .and_then(|i| self.bands.get(i))
                    .cloned()
                    .ok_or(DhmError::Band { band, count })
            })
            .collect::<Result<Vec<_>, DhmError>>()?;
        Self::new(
            self.origin,
            self.cell_size,
            self.dimensions,
            self.nodata,
            selected,
        )
    }

    /// Returns the area covered by this grid.
    pub fn extent(&self) -> Rect<C> {
        let (rows, cols) = self.dimensions;
        #[allow(clippy::cast_precision_loss)]
        let lower_right = Coord {
            x: self.origin.x + cols as C * self.cell_size,
            y: self.origin.y - rows as C * self.cell_size,
        };
        Rect::new(self.origin, lower_right)
    }

    /// Returns the cell edge length in map units.
    pub fn cell_size(&self) -> C {
        self.cell_size
    }

    /// Returns the number of (rows, columns).
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Returns every band's value at `coord`.
    ///
    /// Returns `None` outside the grid or when every band is nodata.
    pub fn get(&self, coord: Coord<C>) -> Option<BandValues> {
        let index = self.coord_to_index(coord)?;
        let values = BandValues::new(
            self.bands
                .iter()
                .map(|band| self.decode(band[index]))
                .collect(),
        );
        (!values.is_nodata()).then_some(values)
    }
}

/// Private API.
impl Grid {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn coord_to_index(&self, coord: Coord<C>) -> Option<usize> {
        let col = ((coord.x - self.origin.x) / self.cell_size).floor();
        let row = ((self.origin.y - coord.y) / self.cell_size).floor();
        let (rows, cols) = self.dimensions;
        if col >= 0.0 && row >= 0.0 && col < cols as C && row < rows as C {
            Some(row as usize * cols + col as usize)
        } else {
            None
        }
    }

    fn decode(&self, raw: f32) -> C {
        match self.nodata {
            Some(nodata) if raw == nodata => C::NAN,
            _ => C::from(raw),
        }
    }

    fn bands_with_nan(&self) -> Vec<Box<[f32]>> {
        self.bands
            .iter()
            .map(|band| {
                band.iter()
                    .map(|&raw| match self.nodata {
                        Some(nodata) if raw == nodata => f32::NAN,
                        _ => raw,
                    })
                    .collect()
            })
            .collect()
    }
}

#[derive(Default)]
struct AsciiHeader {
    ncols: Option<C>,
    nrows: Option<C>,
    xll: Option<(C, bool)>,
    yll: Option<(C, bool)>,
    cell_size: Option<C>,
    nodata: Option<C>,
}

impl AsciiHeader {
    fn set(&mut self, key: &str, value: C) -> Result<(), DhmError> {
        match key.to_ascii_lowercase().as_str() {
            "ncols" => self.ncols = Some(value),
            "nrows" => self.nrows = Some(value),
            "xllcorner" => self.xll = Some((value, false)),
            "xllcenter" => self.xll = Some((value, true)),
            "yllcorner" => self.yll = Some((value, false)),
            "yllcenter" => self.yll = Some((value, true)),
            "cellsize" => self.cell_size = Some(value),
            "nodata_value" => self.nodata = Some(value),
            _ => return Err(DhmError::Grid(format!("unknown header key {key:?}"))),
        }
        Ok(())
    }

    /// Returns (dimensions, lower-left corner, cell size).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resolve(&self) -> Result<((usize, usize), Coord<C>, C), DhmError> {
        let missing = |key: &str| DhmError::Grid(format!("missing header {key}"));
        let ncols = self.ncols.ok_or_else(|| missing("ncols"))?;
        let nrows = self.nrows.ok_or_else(|| missing("nrows"))?;
        let (xll, x_center) = self.xll.ok_or_else(|| missing("xllcorner"))?;
        let (yll, y_center) = self.yll.ok_or_else(|| missing("yllcorner"))?;
        let cell_size = self.cell_size.ok_or_else(|| missing("cellsize"))?;
        if ncols < 1.0 || nrows < 1.0 || ncols.fract() != 0.0 || nrows.fract() != 0.0 {
            return Err(DhmError::Grid(format!("invalid size {ncols}x{nrows}")));
        }
        let half = cell_size / 2.0;
        let lower_left = Coord {
            x: if x_center { xll - half } else { xll },
            y: if y_center { yll - half } else { yll },
        };
        Ok(((nrows as usize, ncols as usize), lower_left, cell_size))
    }
}
