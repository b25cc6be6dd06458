//! Wires map, layer, and chart events together.
//!
//! A [`ViewerController`] owns every piece of mutable viewer state:
//! the selected source, the drawn features, the chart, and the last
//! profile or time series. Events arrive one at a time through
//! [`ViewerController::handle`]; each rebuilds what it invalidates and
//! redraws the chart.

use crate::{
    features::to_feature_collection, Activation, Feature, FeatureStore, VecFeatureStore,
    ViewerConfig, ViewerError, ViewerMode,
};
use chart::{date_to_x, ChartView, Surface, ZoomTransform};
use dhm::{
    geo::geometry::LineString, MapView, RasterSampler, RasterSource, StyleVariables, TileLayer,
    C,
};
use geojson::FeatureCollection;
use log::{debug, info, warn};
use terrain::{coord_at_distance, Profile, TimeSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    /// No line drawn.
    #[default]
    Idle,

    /// A line is being drawn; the previous one is gone.
    Drawing,

    /// A line exists and the chart follows it.
    ProfileReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Unit offset in map axes; map `y` grows upwards.
    pub fn direction(self) -> (C, C) {
        match self {
            Self::Up => (0.0, 1.0),
            Self::Down => (0.0, -1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DrawStart,
    DrawEnd(LineString<C>),
    SourceSelected(usize),
    Key(ArrowKey),

    /// The chart container changed size.
    Resize { width: f64, height: f64 },

    /// Tiles finished loading; earlier samples may have missed them.
    TilesLoaded,

    /// The map view was dragged.
    ViewChanged,

    /// Pointer click on the chart, in chart pixels.
    ChartClick { x: f64, y: f64 },

    ZoomStart,
    Zoom(ZoomTransform),
    ZoomEnd,
    ResetZoom,
}

pub struct ViewerController<L, M, S, F = VecFeatureStore> {
    config: ViewerConfig,
    layer: L,
    map: M,
    surface: S,
    features: F,
    markers: Vec<Feature>,
    chart: Option<ChartView>,
    container: (f64, f64),
    state: ViewerState,
    selected: usize,
    profile: Option<Profile>,
    /// The line `profile` was sampled along. Differs from the stored
    /// line after a draw too short to profile.
    profiled_line: Option<LineString<C>>,
    series: Option<TimeSeries>,
    height: Option<C>,
}

impl<L, M, S, F> ViewerController<L, M, S, F>
where
    L: TileLayer,
    M: MapView,
    S: Surface,
    F: FeatureStore,
{
    /// Returns a controller showing the first source, with its chart
    /// drawn empty.
    pub fn new(
        config: ViewerConfig,
        layer: L,
        map: M,
        surface: S,
        features: F,
    ) -> Result<Self, ViewerError> {
        config.validate()?;
        let chart = config.mode.chart_options().map(ChartView::new);
        let container = chart.as_ref().map_or((0.0, 0.0), ChartView::dimensions);
        let mut controller = Self {
            config,
            layer,
            map,
            surface,
            features,
            markers: Vec::new(),
            chart,
            container,
            state: ViewerState::Idle,
            selected: 0,
            profile: None,
            profiled_line: None,
            series: None,
            height: None,
        };
        controller.redraw();
        Ok(controller)
    }

    pub fn handle(&mut self, event: Event) -> Result<(), ViewerError> {
        debug!("{:?}: {event:?}", self.state);
        let mode = self.config.mode;
        match event {
            Event::DrawStart if mode == ViewerMode::Profile => self.draw_start(),
            Event::DrawEnd(line) if mode == ViewerMode::Profile => self.draw_end(line),
            Event::Key(key) if mode == ViewerMode::Profile => self.nudge(key),
            Event::ChartClick { x, y } if mode == ViewerMode::Profile => self.place_marker(x, y),
            Event::ViewChanged if mode != ViewerMode::Profile => self.sample_center(),
            Event::SourceSelected(index) => self.select_source(index)?,
            Event::Resize { width, height } => {
                self.container = (width, height);
                self.redraw();
            }
            Event::TilesLoaded => self.refresh(),
            Event::ZoomStart => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.zoom_start();
                }
            }
            Event::Zoom(transform) => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.handle_zoom(transform);
                }
                self.redraw();
            }
            Event::ZoomEnd => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.zoom_end();
                }
            }
            Event::ResetZoom => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.reset_zoom();
                }
                self.redraw();
            }
            event => debug!("{mode:?} viewer ignores {event:?}"),
        }
        Ok(())
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_source(&self) -> &RasterSource {
        &self.config.sources[self.selected]
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// Gives the map engine access to the layer, e.g. to render it
    /// after the view moved.
    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn features(&self) -> &F {
        &self.features
    }

    pub fn chart(&self) -> Option<&ChartView> {
        self.chart.as_ref()
    }

    /// The last successfully built profile.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// The last successful time series sample.
    pub fn series(&self) -> Option<&TimeSeries> {
        self.series.as_ref()
    }

    /// Markers placed by clicking the chart, oldest first.
    pub fn markers(&self) -> &[Feature] {
        &self.markers
    }

    pub fn markers_geojson(&self) -> FeatureCollection {
        to_feature_collection(&self.markers)
    }

    /// Height of the selected source at the map centre.
    pub fn height(&self) -> Option<C> {
        self.height
    }

    /// [`Self::height`] as shown next to the map, one decimal.
    pub fn height_indicator(&self) -> Option<String> {
        self.height.map(|z| format!("{z:.1}"))
    }

    /// Band sampled for the selected source.
    pub fn band(&self) -> usize {
        self.config.mode.activation().band(self.selected)
    }
}

/// Private API.
impl<L, M, S, F> ViewerController<L, M, S, F>
where
    L: TileLayer,
    M: MapView,
    S: Surface,
    F: FeatureStore,
{
    fn transition(&mut self, next: ViewerState) {
        if self.state != next {
            info!("viewer state {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }

    fn draw_start(&mut self) {
        self.features.clear();
        self.transition(ViewerState::Drawing);
    }

    fn draw_end(&mut self, line: LineString<C>) {
        if self.state != ViewerState::Drawing {
            self.features.clear();
        }
        self.features.add(Feature::Line(line));
        self.transition(ViewerState::ProfileReady);
        self.rebuild_profile();
    }

    fn nudge(&mut self, key: ArrowKey) {
        if self.state != ViewerState::ProfileReady {
            return;
        }
        let (dx, dy) = key.direction();
        let step = self.config.nudge;
        self.features.translate(dx * step, dy * step);
        self.rebuild_profile();
    }

    fn select_source(&mut self, index: usize) -> Result<(), ViewerError> {
        let source = self
            .config
            .sources
            .get(index)
            .ok_or(ViewerError::SourceIndex(index))?;
        match self.config.mode.activation() {
            Activation::SwapSource => {
                self.layer.set_source(source)?;
                self.layer.restyle(StyleVariables { bandno: 1 });
            }
            Activation::SelectBand => self.layer.restyle(StyleVariables { bandno: index + 1 }),
        }
        info!("selected source {index}: {}", source.name);
        self.selected = index;
        self.refresh();
        Ok(())
    }

    /// Re-samples whatever the current mode shows.
    fn refresh(&mut self) {
        match self.config.mode {
            ViewerMode::Profile => {
                if self.state == ViewerState::ProfileReady {
                    self.rebuild_profile();
                }
            }
            ViewerMode::TimeSeries | ViewerMode::Mosaic => self.sample_center(),
        }
    }

    /// Rebuilds the profile along the first drawn line. Geometry
    /// failures keep the previous profile and chart.
    fn rebuild_profile(&mut self) {
        let Some(line) = self.features.first_line().cloned() else {
            return;
        };
        let band = self.band();
        let sampler = RasterSampler::new(&self.map, &self.layer);
        let result = Profile::builder()
            .line(line.clone())
            .step_size(self.config.step)
            .band(band)
            .build(&sampler);
        match result {
            Ok(profile) => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.update_data(profile.series());
                }
                self.profile = Some(profile);
                self.profiled_line = Some(line);
                self.redraw();
            }
            Err(err) => warn!("profile not rebuilt: {err}"),
        }
    }

    /// Samples every band at the map centre. Nothing changes while the
    /// centre is not loaded.
    fn sample_center(&mut self) {
        let center = self.map.center();
        let sampler = RasterSampler::new(&self.map, &self.layer);
        let Some(series) = TimeSeries::sample(center, &self.config.sources, &sampler) else {
            debug!("no data at {center:?}");
            return;
        };
        self.height = series.value(self.selected);
        if self.config.mode == ViewerMode::TimeSeries {
            let timeline = date_to_x(self.config.sources[self.selected].date);
            if let Some(chart) = self.chart.as_mut() {
                chart.update_data(
                    series
                        .entries
                        .iter()
                        .map(|&(date, z)| (date_to_x(date), z)),
                );
                chart.set_timeline(Some(timeline));
            }
            self.redraw();
        }
        self.series = Some(series);
    }

    /// Places a marker at the clicked distance along the line the
    /// charted profile was built from.
    fn place_marker(&mut self, x: f64, y: f64) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let (distance, z) = chart.invert((x, y));
        let Some(line) = self.profiled_line.as_ref() else {
            debug!("chart click without a profile");
            return;
        };
        let Some(coord) = coord_at_distance(line, distance) else {
            return;
        };
        info!("marker at {coord:?}, z: {z:.2}");
        self.markers.push(Feature::Point { coord, z: Some(z) });
    }

    fn redraw(&mut self) {
        if let Some(chart) = self.chart.as_mut() {
            chart.update_plot(self.container, &mut self.surface);
        }
    }
}
