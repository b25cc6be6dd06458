//! Viewer configuration.

use crate::ViewerError;
use chart::ChartOptions;
use dhm::{DhmError, InitialView, MetadataSource, RasterSource, C};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};
use terrain::TerrainError;

/// Default profile sampling step, in map units.
pub const DEFAULT_STEP: C = 0.5;

/// Default arrow-key offset, in map units.
pub const DEFAULT_NUDGE: C = 0.5;

/// How selecting a year changes what the layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Swap the layer's source; sample band 0.
    SwapSource,

    /// Restyle a multi-band layer to band `index + 1`; sample band
    /// `index`.
    SelectBand,
}

impl Activation {
    /// Returns the band sampled while source `selected` is shown.
    pub fn band(self, selected: usize) -> usize {
        match self {
            Self::SwapSource => 0,
            Self::SelectBand => selected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerMode {
    /// Terrain profile along a drawn line.
    #[default]
    Profile,

    /// Height over time at the map centre.
    TimeSeries,

    /// Height indicator only, over the union of every source.
    Mosaic,
}

impl ViewerMode {
    pub fn activation(self) -> Activation {
        match self {
            Self::Profile => Activation::SwapSource,
            Self::TimeSeries | Self::Mosaic => Activation::SelectBand,
        }
    }

    /// Returns this mode's chart, if it has one.
    pub fn chart_options(self) -> Option<ChartOptions> {
        match self {
            Self::Profile => Some(ChartOptions::profile()),
            Self::TimeSeries => Some(ChartOptions::time_series()),
            Self::Mosaic => None,
        }
    }

    /// Computes the map's initial view.
    ///
    /// Metadata is fetched for every source; any failure fails the
    /// whole construction.
    pub fn initial_view<M>(self, provider: &M, sources: &[RasterSource]) -> Result<InitialView, DhmError>
    where
        M: MetadataSource + ?Sized,
    {
        let view = match self {
            Self::Mosaic => InitialView::for_all(provider, sources)?,
            Self::Profile | Self::TimeSeries => {
                let (first, rest) = sources.split_first().ok_or(DhmError::EmptyCatalog)?;
                let view = InitialView::for_source(provider, first)?;
                for source in rest {
                    provider.metadata(source)?;
                }
                view
            }
        };
        debug!("{self:?} initial view: {view:?}");
        Ok(view)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub mode: ViewerMode,

    /// Profile sampling step, in map units.
    #[serde(default = "default_step")]
    pub step: C,

    /// Distance one arrow key press moves the line, in map units.
    #[serde(default = "default_nudge")]
    pub nudge: C,

    /// Selectable sources, in selector order.
    pub sources: Vec<RasterSource>,
}

impl ViewerConfig {
    /// Returns a config with default step and nudge.
    pub fn new(mode: ViewerMode, sources: Vec<RasterSource>) -> Self {
        Self {
            mode,
            step: DEFAULT_STEP,
            nudge: DEFAULT_NUDGE,
            sources,
        }
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, ViewerError> {
        let config: Self = serde_json::from_reader(rdr)?;
        config.validate()?;
        Ok(config)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ViewerError> {
        debug!("loading config {:?}", path.as_ref());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.sources.is_empty() {
            return Err(DhmError::EmptyCatalog.into());
        }
        for value in [self.step, self.nudge] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TerrainError::InvalidStep(value).into());
            }
        }
        Ok(())
    }

    /// Rewrites relative source URLs as paths under `base`.
    pub fn resolve_urls(&mut self, base: &Path) {
        for source in &mut self.sources {
            let url = Path::new(&source.url);
            if url.is_relative() {
                source.url = base.join(url).to_string_lossy().into_owned();
            }
        }
    }
}

impl FromStr for ViewerConfig {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

fn default_step() -> C {
    DEFAULT_STEP
}

fn default_nudge() -> C {
    DEFAULT_NUDGE
}

#[cfg(test)]
mod tests {
    use super::{Activation, ViewerConfig, ViewerMode};
    use crate::ViewerError;
    use dhm::{
        geo::geometry::{Coord, Rect},
        DhmError, MetadataSource, RasterSource, SourceMetadata,
    };
    use std::path::Path;
    use terrain::TerrainError;

    const CONFIG: &str = r#"{
        "sources": [
            {"name": "DHM 2001", "date": "01.06.2001", "url": "dhm_2001.asc"},
            {"name": "DHM 2019", "date": "01.06.2019", "url": "/data/dhm_2019.asc", "bands": [1]}
        ]
    }"#;

    #[test]
    fn test_defaults() {
        let config: ViewerConfig = CONFIG.parse().unwrap();
        assert_eq!(config.mode, ViewerMode::Profile);
        assert_eq!(config.step, 0.5);
        assert_eq!(config.nudge, 0.5);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].bands, vec![1]);
    }

    #[test]
    fn test_mode_names() {
        let config: ViewerConfig = r#"{"mode": "time_series", "step": 2.0, "sources": [
            {"name": "a", "date": "01.01.2020", "url": "a.asc"}
        ]}"#
        .parse()
        .unwrap();
        assert_eq!(config.mode, ViewerMode::TimeSeries);
        assert_eq!(config.step, 2.0);
        assert_eq!(
            serde_json::to_string(&ViewerMode::Mosaic).unwrap(),
            r#""mosaic""#
        );
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            r#"{"sources": []}"#.parse::<ViewerConfig>(),
            Err(ViewerError::Dhm(DhmError::EmptyCatalog))
        ));
        assert!(matches!(
            r#"{"step": 0.0, "sources": [{"name": "a", "date": "01.01.2020", "url": "a.asc"}]}"#
                .parse::<ViewerConfig>(),
            Err(ViewerError::Terrain(TerrainError::InvalidStep(_)))
        ));
        // Malformed dates fail the whole load.
        assert!(matches!(
            r#"{"sources": [{"name": "a", "date": "2020", "url": "a.asc"}]}"#
                .parse::<ViewerConfig>(),
            Err(ViewerError::Json(_))
        ));
    }

    #[test]
    fn test_resolve_urls() {
        let mut config: ViewerConfig = CONFIG.parse().unwrap();
        config.resolve_urls(Path::new("/srv/dhm"));
        assert_eq!(
            Path::new(&config.sources[0].url),
            Path::new("/srv/dhm/dhm_2001.asc")
        );
        assert_eq!(config.sources[1].url, "/data/dhm_2019.asc");
    }

    #[test]
    fn test_activation() {
        assert_eq!(ViewerMode::Profile.activation(), Activation::SwapSource);
        assert_eq!(ViewerMode::Mosaic.activation(), Activation::SelectBand);
        assert_eq!(Activation::SwapSource.band(3), 0);
        assert_eq!(Activation::SelectBand.band(3), 3);
        assert!(ViewerMode::Mosaic.chart_options().is_none());
        assert!(ViewerMode::TimeSeries.chart_options().is_some());
    }

    /// Reports a 10x10 extent shifted right by the source's band
    /// number, failing for URLs ending in `.missing`.
    struct Extents;

    impl MetadataSource for Extents {
        fn metadata(&self, source: &RasterSource) -> Result<SourceMetadata, DhmError> {
            if source.url.ends_with(".missing") {
                return Err(DhmError::SourceMetadata {
                    name: source.name.clone(),
                    reason: "not found".to_owned(),
                });
            }
            #[allow(clippy::cast_precision_loss)]
            let dx = source.bands[0] as f64 * 10.0;
            Ok(SourceMetadata {
                projection: "EPSG:2056".to_owned(),
                extent: Rect::new(Coord { x: dx, y: 0.0 }, Coord { x: dx + 10.0, y: 10.0 }),
                resolutions: vec![4.0, 2.0, 1.0],
                zoom: 1,
            })
        }
    }

    #[test]
    fn test_initial_view() {
        let sources = vec![
            RasterSource::new("a", "01.01.2020", "a.asc", vec![0]).unwrap(),
            RasterSource::new("b", "01.01.2021", "b.asc", vec![1]).unwrap(),
        ];
        let single = ViewerMode::Profile.initial_view(&Extents, &sources).unwrap();
        assert_eq!(single.center, Coord { x: 5.0, y: 5.0 });
        assert_eq!(single.resolution, 2.0);

        let union = ViewerMode::Mosaic.initial_view(&Extents, &sources).unwrap();
        assert_eq!(union.center, Coord { x: 10.0, y: 5.0 });
        assert_eq!(union.resolution, 4.0);

        let mut broken = sources;
        broken[1].url = "b.missing".to_owned();
        assert!(matches!(
            ViewerMode::Profile.initial_view(&Extents, &broken),
            Err(DhmError::SourceMetadata { .. })
        ));
    }
}
