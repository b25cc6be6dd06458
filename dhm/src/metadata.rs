//! Source metadata and the map's initial view.

use crate::{DhmError, RasterSource, C};
use geo::geometry::{Coord, Rect};
use log::debug;

/// Georeferencing information a source reports once it has been
/// opened.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMetadata {
    /// Projection code, e.g. `EPSG:2056`.
    pub projection: String,

    /// Area covered by the source.
    pub extent: Rect<C>,

    /// Resolutions (map units per pixel) of the source's overview
    /// levels, coarsest first.
    pub resolutions: Vec<C>,

    /// Suggested index into `resolutions` for the initial view.
    pub zoom: usize,
}

/// Something able to produce a source's metadata.
///
/// For remote rasters this is the (fallible) header fetch; until it
/// succeeds for every configured source no map can be shown.
pub trait MetadataSource {
    fn metadata(&self, source: &RasterSource) -> Result<SourceMetadata, DhmError>;
}

/// Centre, resolution, and bounds of a freshly constructed map.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialView {
    pub projection: String,
    pub center: Coord<C>,
    pub resolution: C,

    /// Constrains panning, when set.
    pub extent: Option<Rect<C>>,
}

impl InitialView {
    /// Returns the view of a single source: its centre at its
    /// suggested zoom level.
    pub fn single(metadata: &SourceMetadata) -> Result<Self, DhmError> {
        let resolution = metadata
            .resolutions
            .get(metadata.zoom)
            .or_else(|| metadata.resolutions.last())
            .copied()
            .ok_or_else(|| DhmError::NoResolutions {
                projection: metadata.projection.clone(),
            })?;
        Ok(Self {
            projection: metadata.projection.clone(),
            center: metadata.extent.center(),
            resolution,
            extent: None,
        })
    }

    /// Returns a view over the union of every source's extent, at the
    /// coarsest resolution.
    pub fn union(metadata: &[SourceMetadata]) -> Result<Self, DhmError> {
        let (first, rest) = metadata.split_first().ok_or(DhmError::EmptyCatalog)?;
        let extent = rest.iter().fold(first.extent, |acc, m| {
            Rect::new(
                Coord {
                    x: acc.min().x.min(m.extent.min().x),
                    y: acc.min().y.min(m.extent.min().y),
                },
                Coord {
                    x: acc.max().x.max(m.extent.max().x),
                    y: acc.max().y.max(m.extent.max().y),
                },
            )
        });
        let resolution = first
            .resolutions
            .first()
            .copied()
            .ok_or_else(|| DhmError::NoResolutions {
                projection: first.projection.clone(),
            })?;
        Ok(Self {
            projection: first.projection.clone(),
            center: extent.center(),
            resolution,
            extent: Some(extent),
        })
    }

    /// Fetches metadata for `source` and returns its view.
    pub fn for_source<M: MetadataSource + ?Sized>(
        provider: &M,
        source: &RasterSource,
    ) -> Result<Self, DhmError> {
        let metadata = provider.metadata(source)?;
        Self::single(&metadata).map_err(|err| named(err, source))
    }

    /// Fetches metadata for every source and returns the union view.
    ///
    /// Fails if any single source fails; no partial view is built.
    pub fn for_all<M: MetadataSource + ?Sized>(
        provider: &M,
        sources: &[RasterSource],
    ) -> Result<Self, DhmError> {
        let metadata = sources
            .iter()
            .map(|source| provider.metadata(source))
            .collect::<Result<Vec<_>, DhmError>>()?;
        let view = Self::union(&metadata).map_err(|err| match sources.first() {
            Some(first) => named(err, first),
            None => err,
        })?;
        debug!(
            "initial view; sources: {}, center: {:?}, resolution: {}",
            sources.len(),
            view.center,
            view.resolution
        );
        Ok(view)
    }
}

/// Attributes a metadata error to `source`.
fn named(err: DhmError, source: &RasterSource) -> DhmError {
    match err {
        DhmError::NoResolutions { projection } => DhmError::SourceMetadata {
            name: source.name.clone(),
            reason: format!("no resolution levels in {projection} metadata"),
        },
        err => err,
    }
}
