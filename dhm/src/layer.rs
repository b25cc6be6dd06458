use crate::{
    BandValues, DhmError, Grid, MapView, MetadataSource, RasterSource, SourceMetadata, Viewport,
    C,
};
use geo::geometry::Coord;
use log::{debug, info};

/// Variables consumed by a raster layer's style expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleVariables {
    /// Band (1-based) used to colour the layer.
    pub bandno: usize,
}

impl Default for StyleVariables {
    fn default() -> Self {
        Self { bandno: 1 }
    }
}

/// A rendered raster layer as exposed by a map engine.
pub trait TileLayer {
    /// Returns the decoded band values rendered at `pixel`.
    ///
    /// Returns `None` when nothing is loaded there: outside the raster
    /// extent, a tile still in flight, or nodata in every band.
    fn data_at(&self, pixel: Coord<C>) -> Option<BandValues>;

    /// Makes `source` the layer's data source.
    fn set_source(&mut self, source: &RasterSource) -> Result<(), DhmError>;

    fn restyle(&mut self, style: StyleVariables);
}

/// Overview pyramid depth reported in [`SourceMetadata`].
const OVERVIEW_LEVELS: i32 = 6;

struct Entry {
    /// Source URLs whose data lives in `grid`.
    urls: Vec<String>,
    grid: Grid,
}

/// A [`TileLayer`] over in-memory [`Grid`]s.
///
/// Pixels are only "loaded" inside the frame passed to the last
/// [`GridLayer::render`] call, mirroring a tile layer that has not yet
/// fetched data for parts of the map it never drew.
pub struct GridLayer {
    entries: Vec<Entry>,
    active: usize,
    style: StyleVariables,
    projection: String,
    frame: Option<Viewport>,
}

impl GridLayer {
    /// Returns a layer with one single-source entry per
    /// (source, grid) pair. The first pair is active.
    pub fn new(sources: Vec<(RasterSource, Grid)>) -> Result<Self, DhmError> {
        if sources.is_empty() {
            return Err(DhmError::EmptyCatalog);
        }
        let entries = sources
            .into_iter()
            .map(|(source, grid)| Entry {
                urls: vec![source.url],
                grid,
            })
            .collect();
        Ok(Self::from_entries(entries))
    }

    /// Opens each source's `url` as an ESRI ASCII grid, keeping the
    /// source's selected bands.
    pub fn open(sources: &[RasterSource]) -> Result<Self, DhmError> {
        let pairs = sources
            .iter()
            .map(|source| {
                let grid = Grid::open(&source.url)?.select_bands(&source.bands)?;
                Ok((source.clone(), grid))
            })
            .collect::<Result<Vec<_>, DhmError>>()?;
        Self::new(pairs)
    }

    /// Opens every source and stacks them into a single multi-band
    /// grid, band `i` holding source `i`.
    pub fn stacked(sources: &[RasterSource]) -> Result<Self, DhmError> {
        let grids = sources
            .iter()
            .map(|source| Grid::open(&source.url)?.select_bands(&source.bands))
            .collect::<Result<Vec<_>, DhmError>>()?;
        Self::stacked_from(sources, Grid::stack(grids)?)
    }

    /// Returns a layer whose only entry is `grid`, shared by every
    /// source.
    pub fn stacked_from(sources: &[RasterSource], grid: Grid) -> Result<Self, DhmError> {
        if sources.is_empty() {
            return Err(DhmError::EmptyCatalog);
        }
        let urls = sources.iter().map(|source| source.url.clone()).collect();
        Ok(Self::from_entries(vec![Entry { urls, grid }]))
    }

    /// Records `view` as the latest rendered frame.
    pub fn render(&mut self, view: &Viewport) {
        self.frame = Some(*view);
    }

    pub fn style(&self) -> StyleVariables {
        self.style
    }

    /// Returns the grid currently providing data.
    pub fn active_grid(&self) -> &Grid {
        &self.entries[self.active].grid
    }
}

/// Private API.
impl GridLayer {
    fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            active: 0,
            style: StyleVariables::default(),
            projection: "EPSG:2056".to_owned(),
            frame: None,
        }
    }

    fn find(&self, source: &RasterSource) -> Result<usize, DhmError> {
        self.entries
            .iter()
            .position(|entry| entry.urls.contains(&source.url))
            .ok_or_else(|| DhmError::UnknownSource(source.url.clone()))
    }
}

impl TileLayer for GridLayer {
    fn data_at(&self, pixel: Coord<C>) -> Option<BandValues> {
        let frame = self.frame.as_ref()?;
        if !frame.contains_pixel(pixel) {
            return None;
        }
        self.active_grid().get(frame.coord_from_pixel(pixel))
    }

    fn set_source(&mut self, source: &RasterSource) -> Result<(), DhmError> {
        self.active = self.find(source)?;
        info!("active source: {}", source.name);
        Ok(())
    }

    fn restyle(&mut self, style: StyleVariables) {
        debug!("restyle: {style:?}");
        self.style = style;
    }
}

impl MetadataSource for GridLayer {
    fn metadata(&self, source: &RasterSource) -> Result<SourceMetadata, DhmError> {
        let grid = &self.entries[self.find(source)?].grid;
        let resolutions = (0..OVERVIEW_LEVELS)
            .rev()
            .map(|level| grid.cell_size() * C::powi(2.0, level))
            .collect();
        Ok(SourceMetadata {
            projection: self.projection.clone(),
            extent: grid.extent(),
            resolutions,
            zoom: 0,
        })
    }
}
