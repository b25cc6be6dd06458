use crate::{
    time::{nice_years, year_label, year_ticks},
    Axis, AxisId, Cursor, Label, LabelId, LinearScale, Orient, PixelRect, Surface, Tick,
    ZoomTransform,
};
use log::debug;

/// Axis and label font size in points.
const FONT_SIZE: f64 = 11.0;

const TICK_SIZE: f64 = 6.0;

/// Distance of the axis titles from their axis line, in pixels.
const LABEL_OFFSET: f64 = 50.0;

/// Axis position of 2001-01-01.
const SERIES_START: f64 = 11_323.0;

/// Axis position of 2024-01-31.
const SERIES_END: f64 = 19_753.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// The visible data-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl BBox {
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }
}

/// Where an axis takes its domain from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainMode {
    /// Extent of the data, widened by `pad` on both ends.
    Data { pad: f64 },

    /// `[min - pad, max + pad]`, whatever the data.
    Fixed { min: f64, max: f64, pad: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    Number,

    /// Axis values are days since 1970-01-01, labelled by year.
    Year,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisOptions {
    pub domain: DomainMode,

    /// Extend the domain to round tick values.
    pub nice: bool,

    pub format: TickFormat,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Initial size, replaced on the first [`ChartView::update_plot`].
    pub width: f64,
    pub height: f64,

    pub margins: Margins,

    /// Height the chart is pinned to on every redraw.
    pub max_height: f64,

    pub x: AxisOptions,
    pub y: AxisOptions,

    /// Keep one data unit the same number of pixels on both axes.
    pub aspect_lock: bool,

    /// Compose pan/zoom gestures into the scales.
    pub zoomable: bool,

    /// Round mapped positions to whole pixels.
    pub round: bool,
}

impl ChartOptions {
    /// Distance/height chart for terrain profiles.
    pub fn profile() -> Self {
        Self {
            width: 650.0,
            height: 300.0,
            margins: Margins {
                left: 85.0,
                right: 60.0,
                top: 0.0,
                bottom: 0.0,
            },
            max_height: 250.0,
            x: AxisOptions {
                domain: DomainMode::Data { pad: 0.0 },
                nice: false,
                format: TickFormat::Number,
                label: "Distance [m]".to_owned(),
            },
            y: AxisOptions {
                domain: DomainMode::Data { pad: 0.0 },
                nice: false,
                format: TickFormat::Number,
                label: "Height [m]".to_owned(),
            },
            aspect_lock: true,
            zoomable: true,
            round: true,
        }
    }

    /// Date/height chart over the survey years.
    pub fn time_series() -> Self {
        Self {
            width: 650.0,
            height: 200.0,
            margins: Margins {
                left: 85.0,
                right: 60.0,
                top: 0.0,
                bottom: 0.0,
            },
            max_height: 250.0,
            x: AxisOptions {
                domain: DomainMode::Fixed {
                    min: SERIES_START,
                    max: SERIES_END,
                    pad: 0.0,
                },
                nice: true,
                format: TickFormat::Year,
                label: "Year".to_owned(),
            },
            y: AxisOptions {
                domain: DomainMode::Fixed {
                    min: 0.0,
                    max: 60.0,
                    pad: 0.05,
                },
                nice: true,
                format: TickFormat::Number,
                label: "Height [m]".to_owned(),
            },
            aspect_lock: false,
            zoomable: false,
            round: false,
        }
    }
}

/// A line chart's complete draw state.
///
/// Scales, extents, and the visible window are derived from the
/// state on every call; nothing derived is cached.
#[derive(Debug, Clone)]
pub struct ChartView {
    options: ChartOptions,
    width: f64,
    height: f64,

    /// Series without `NaN` heights.
    data: Vec<(f64, f64)>,

    bbox: BBox,
    transform: ZoomTransform,
    cursor: Cursor,

    /// Data-space x of the vertical marker.
    timeline: Option<f64>,
}

impl ChartView {
    pub fn new(options: ChartOptions) -> Self {
        let mut view = Self {
            width: options.width,
            height: options.height,
            options,
            data: Vec::new(),
            bbox: BBox {
                xmin: 0.0,
                xmax: 100.0,
                ymin: 0.0,
                ymax: 100.0,
            },
            transform: ZoomTransform::identity(),
            cursor: Cursor::Crosshair,
            timeline: None,
        };
        view.sync_bbox();
        view
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.data
    }

    /// Returns the visible data window.
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn inner_width(&self) -> f64 {
        self.width - self.options.margins.left - self.options.margins.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.options.margins.top - self.options.margins.bottom
    }

    pub fn x_range(&self) -> (f64, f64) {
        (
            self.options.margins.left,
            self.width - self.options.margins.right,
        )
    }

    pub fn y_range(&self) -> (f64, f64) {
        (
            self.height - self.options.margins.bottom,
            self.options.margins.top,
        )
    }

    /// Returns the points inside the visible window.
    pub fn filtered_data(&self) -> Vec<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|&point| self.bbox.contains(point))
            .collect()
    }

    /// Returns the x domain before aspect adjustment, taken from the
    /// full series regardless of zoom.
    pub fn x_extent(&self) -> (f64, f64) {
        extent(self.options.x.domain, self.data.iter().map(|&(x, _)| x))
    }

    pub fn y_extent(&self) -> (f64, f64) {
        extent(self.options.y.domain, self.data.iter().map(|&(_, y)| y))
    }

    pub fn data_width(&self) -> f64 {
        let (x0, x1) = self.x_extent();
        x1 - x0
    }

    pub fn data_height(&self) -> f64 {
        let (y0, y1) = self.y_extent();
        y1 - y0
    }

    pub fn data_aspect_ratio(&self) -> f64 {
        self.data_width() / self.data_height()
    }

    pub fn chart_aspect_ratio(&self) -> f64 {
        self.inner_width() / self.inner_height()
    }

    /// Returns the x extent, widened when the data is relatively
    /// taller than the plot.
    pub fn x_extent_adjusted(&self) -> (f64, f64) {
        let (x0, x1) = self.x_extent();
        if self.options.aspect_lock && self.data_aspect_ratio() <= self.chart_aspect_ratio() {
            (x0, self.chart_aspect_ratio() * self.data_height() + x0)
        } else {
            (x0, x1)
        }
    }

    /// Returns the y extent, heightened when the data is relatively
    /// wider than the plot.
    pub fn y_extent_adjusted(&self) -> (f64, f64) {
        let (y0, y1) = self.y_extent();
        if self.options.aspect_lock && self.data_aspect_ratio() > self.chart_aspect_ratio() {
            (y0, self.data_width() / self.chart_aspect_ratio() + y0)
        } else {
            (y0, y1)
        }
    }

    /// Returns the x scale before any pan/zoom.
    pub fn base_x_scale(&self) -> LinearScale {
        let scale = LinearScale::new(self.x_extent_adjusted(), self.x_range())
            .with_round(self.options.round);
        nice(scale, &self.options.x)
    }

    pub fn base_y_scale(&self) -> LinearScale {
        let scale = LinearScale::new(self.y_extent_adjusted(), self.y_range())
            .with_round(self.options.round);
        nice(scale, &self.options.y)
    }

    /// Returns the x scale used for drawing and pointer inversion.
    pub fn x_scale(&self) -> LinearScale {
        let base = self.base_x_scale();
        if self.options.zoomable {
            self.transform.rescale_x(&base)
        } else {
            base
        }
    }

    pub fn y_scale(&self) -> LinearScale {
        let base = self.base_y_scale();
        if self.options.zoomable {
            self.transform.rescale_y(&base)
        } else {
            base
        }
    }

    /// Converts a pointer position to data space.
    pub fn invert(&self, (px, py): (f64, f64)) -> (f64, f64) {
        (self.x_scale().invert(px), self.y_scale().invert(py))
    }

    /// Replaces the series, dropping points with a `NaN` height.
    pub fn update_data<I>(&mut self, series: I)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.data = series.into_iter().filter(|(_, y)| !y.is_nan()).collect();
        self.sync_bbox();
    }

    /// Places the vertical marker at data-space `x`, or removes it.
    pub fn set_timeline(&mut self, x: Option<f64>) {
        self.timeline = x;
    }

    /// Adopts the container's width; the height stays pinned to
    /// `max_height`.
    pub fn resize(&mut self, (width, height): (f64, f64)) {
        let max_height = self.options.max_height;
        self.width = width;
        self.height = height.max(max_height).min(max_height);
        self.sync_bbox();
    }

    /// Resizes to `container` and redraws every element.
    pub fn update_plot<S: Surface + ?Sized>(&mut self, container: (f64, f64), surface: &mut S) {
        self.resize(container);
        debug!(
            "chart; size: {}x{}, inner: {}x{}, x_extent: {:?}, y_extent: {:?}, \
             x_adjusted: {:?}, y_adjusted: {:?}, data_ar: {}, chart_ar: {}",
            self.width,
            self.height,
            self.inner_width(),
            self.inner_height(),
            self.x_extent(),
            self.y_extent(),
            self.x_extent_adjusted(),
            self.y_extent_adjusted(),
            self.data_aspect_ratio(),
            self.chart_aspect_ratio()
        );
        self.redraw(surface);
    }

    /// Redraws every element from the current state.
    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.update_viewbox(surface);
        self.update_clip_path(surface);
        self.update_body(surface);
        self.update_x_axis(surface);
        self.update_y_axis(surface);
        self.update_x_axis_grid(surface);
        self.update_y_axis_grid(surface);
        self.update_x_axis_label(surface);
        self.update_y_axis_label(surface);
        self.update_line(surface);
        self.update_timeline(surface);
    }

    pub fn update_viewbox<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_viewbox(self.width, self.height);
    }

    pub fn update_body<S: Surface + ?Sized>(&self, surface: &mut S) {
        let rect = PixelRect {
            x: self.options.margins.left,
            y: self.options.margins.top,
            width: self.inner_width(),
            height: self.inner_height(),
        };
        surface.set_body(rect, self.cursor);
    }

    pub fn update_clip_path<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_clip(PixelRect {
            x: self.options.margins.left,
            y: 0.0,
            width: self.inner_width(),
            height: self.inner_height(),
        });
    }

    pub fn update_x_axis<S: Surface + ?Sized>(&self, surface: &mut S) {
        let scale = self.x_scale();
        surface.set_axis(
            AxisId::X,
            Axis {
                orient: Orient::Bottom,
                origin: (0.0, self.height - self.options.margins.bottom),
                range: scale.range(),
                ticks: ticks(&scale, self.width / 100.0, self.options.x.format, true),
                tick_size: TICK_SIZE,
                font_size: FONT_SIZE,
            },
        );
    }

    pub fn update_y_axis<S: Surface + ?Sized>(&self, surface: &mut S) {
        let scale = self.y_scale();
        surface.set_axis(
            AxisId::Y,
            Axis {
                orient: Orient::Left,
                origin: (self.options.margins.left, 0.0),
                range: scale.range(),
                ticks: ticks(&scale, self.height / 30.0, self.options.y.format, true),
                tick_size: TICK_SIZE,
                font_size: FONT_SIZE,
            },
        );
    }

    pub fn update_x_axis_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let scale = self.x_scale();
        surface.set_axis(
            AxisId::XGrid,
            Axis {
                orient: Orient::Bottom,
                origin: (0.0, self.height - self.options.margins.bottom),
                range: scale.range(),
                ticks: ticks(&scale, self.width / 80.0, self.options.x.format, false),
                tick_size: -self.inner_height(),
                font_size: FONT_SIZE,
            },
        );
    }

    pub fn update_y_axis_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let scale = self.y_scale();
        surface.set_axis(
            AxisId::YGrid,
            Axis {
                orient: Orient::Left,
                origin: (self.options.margins.left, 0.0),
                range: scale.range(),
                ticks: ticks(&scale, self.height / 60.0, self.options.y.format, false),
                tick_size: -self.inner_width(),
                font_size: FONT_SIZE,
            },
        );
    }

    pub fn update_x_axis_label<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Margins { left, bottom, .. } = self.options.margins;
        surface.set_label(
            LabelId::X,
            Label {
                text: self.options.x.label.clone(),
                position: (
                    left + self.inner_width() / 2.0,
                    self.height - bottom + LABEL_OFFSET,
                ),
                rotation: 0.0,
                font_size: FONT_SIZE,
            },
        );
    }

    pub fn update_y_axis_label<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Margins { left, top, .. } = self.options.margins;
        surface.set_label(
            LabelId::Y,
            Label {
                text: self.options.y.label.clone(),
                position: (left - LABEL_OFFSET, top + self.inner_height() / 2.0),
                rotation: -90.0,
                font_size: FONT_SIZE,
            },
        );
    }

    /// Draws the whole series; the clip region hides what lies
    /// outside the visible window.
    pub fn update_line<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (xs, ys) = (self.x_scale(), self.y_scale());
        surface.set_line(
            self.data
                .iter()
                .map(|&(x, y)| (xs.map(x), ys.map(y)))
                .collect(),
        );
    }

    pub fn update_timeline<S: Surface + ?Sized>(&self, surface: &mut S) {
        let x = if self.data.is_empty() {
            None
        } else {
            self.timeline.map(|x| self.x_scale().map(x))
        };
        surface.set_timeline(x);
    }

    pub fn zoom_start(&mut self) {
        if self.options.zoomable {
            self.cursor = Cursor::Move;
        }
    }

    /// Adopts a gesture's transform.
    ///
    /// `transform` is the gesture's total transform and is always
    /// composed onto the base scales, never onto a previously
    /// transformed one.
    pub fn handle_zoom(&mut self, transform: ZoomTransform) {
        if !self.options.zoomable {
            return;
        }
        self.transform = transform;
        self.sync_bbox();
        debug!("zoom; transform: {:?}, bbox: {:?}", self.transform, self.bbox);
    }

    /// Ends a gesture; the transform stays in effect.
    pub fn zoom_end(&mut self) {
        self.cursor = Cursor::Crosshair;
    }

    /// Zooms by `factor` around pixel `anchor`.
    pub fn zoom_by(&mut self, factor: f64, anchor: (f64, f64)) {
        self.handle_zoom(self.transform.scale_by(factor, anchor));
    }

    /// Pans by a pixel offset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.handle_zoom(self.transform.pan_by(dx, dy));
    }

    pub fn reset_zoom(&mut self) {
        self.transform = ZoomTransform::identity();
        self.sync_bbox();
    }
}

/// Private API.
impl ChartView {
    fn sync_bbox(&mut self) {
        let (xmin, xmax) = self.x_scale().domain();
        let (ymin, ymax) = self.y_scale().domain();
        self.bbox = BBox {
            xmin,
            xmax,
            ymin,
            ymax,
        };
    }
}

fn extent<I: Iterator<Item = f64>>(mode: DomainMode, values: I) -> (f64, f64) {
    match mode {
        DomainMode::Fixed { min, max, pad } => (min - pad, max + pad),
        DomainMode::Data { pad } => {
            let (lo, hi) = values
                .filter(|v| v.is_finite())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            if lo > hi {
                (0.0, 1.0)
            } else {
                (lo - pad, hi + pad)
            }
        }
    }
}

fn nice(scale: LinearScale, options: &AxisOptions) -> LinearScale {
    match (options.nice, options.format) {
        (false, _) => scale,
        (true, TickFormat::Number) => scale.nice(10.0),
        (true, TickFormat::Year) => scale.with_domain(nice_years(scale.domain(), 10.0)),
    }
}

fn ticks(scale: &LinearScale, count: f64, format: TickFormat, labelled: bool) -> Vec<Tick> {
    let values = match format {
        TickFormat::Number => scale.ticks(count),
        TickFormat::Year => year_ticks(scale.domain(), count),
    };
    values
        .into_iter()
        .map(|value| Tick {
            position: scale.map(value),
            label: match (labelled, format) {
                (false, _) => String::new(),
                (true, TickFormat::Number) => scale.tick_format(count, value),
                (true, TickFormat::Year) => year_label(value),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ChartOptions, ChartView, SERIES_END, SERIES_START};
    use crate::{date_to_x, x_to_date, AxisId, Cursor, Frame};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    const CONTAINER: (f64, f64) = (650.0, 400.0);

    fn profile(data: &[(f64, f64)]) -> (ChartView, Frame) {
        let mut chart = ChartView::new(ChartOptions::profile());
        chart.update_data(data.iter().copied());
        let mut frame = Frame::default();
        chart.update_plot(CONTAINER, &mut frame);
        (chart, frame)
    }

    #[test]
    fn test_height_is_pinned() {
        let mut chart = ChartView::new(ChartOptions::profile());
        chart.resize((800.0, 1000.0));
        assert_eq!(chart.dimensions(), (800.0, 250.0));
        chart.resize((300.0, 10.0));
        assert_eq!(chart.dimensions(), (300.0, 250.0));
        assert_eq!(chart.x_range(), (85.0, 240.0));
        assert_eq!(chart.y_range(), (250.0, 0.0));
    }

    #[test]
    fn test_wide_data_extends_y() {
        let (chart, _) = profile(&[(0.0, 0.0), (50.0, 3.0), (100.0, 10.0)]);
        let chart_ar = chart.chart_aspect_ratio();
        assert_relative_eq!(chart_ar, 505.0 / 250.0);
        assert!(chart.data_aspect_ratio() > chart_ar);
        assert_eq!(chart.x_extent_adjusted(), chart.x_extent());
        let (y0, y1) = chart.y_extent_adjusted();
        assert_relative_eq!(y0, 0.0);
        assert_relative_eq!(chart.data_width() / (y1 - y0), chart_ar, epsilon = 1e-12);
    }

    #[test]
    fn test_tall_data_extends_x() {
        let (chart, _) = profile(&[(0.0, 500.0), (10.0, 600.0)]);
        assert!(chart.data_aspect_ratio() <= chart.chart_aspect_ratio());
        assert_eq!(chart.y_extent_adjusted(), (500.0, 600.0));
        let (x0, x1) = chart.x_extent_adjusted();
        assert_relative_eq!(x0, 0.0);
        assert_relative_eq!(x1, chart.chart_aspect_ratio() * 100.0);
    }

    #[test]
    fn test_nan_filtering() {
        let mut chart = ChartView::new(ChartOptions::profile());
        chart.update_data(vec![
            (0.0, 1.0),
            (0.5, f64::NAN),
            (1.0, 3.0),
            (1.5, 2.0),
            (2.0, f64::NAN),
        ]);
        assert_eq!(chart.data(), &[(0.0, 1.0), (1.0, 3.0), (1.5, 2.0)]);
    }

    #[test]
    fn test_empty_data() {
        let chart = ChartView::new(ChartOptions::profile());
        assert_eq!(chart.x_extent(), (0.0, 1.0));
        assert_eq!(chart.y_extent(), (0.0, 1.0));
        let mut frame = Frame::default();
        chart.redraw(&mut frame);
        assert!(frame.line.is_empty());
        assert!(frame.timeline.is_none());
    }

    #[test]
    fn test_frame_layout() {
        let (chart, frame) = profile(&[(0.0, 0.0), (100.0, 20.0)]);
        assert_eq!(frame.viewbox, (650.0, 250.0));
        assert_eq!(frame.clip.x, 85.0);
        assert_eq!(frame.clip.width, 505.0);
        assert_eq!(frame.clip.height, 250.0);
        assert_eq!(frame.cursor, Cursor::Crosshair);

        let x_label = frame.x_label.as_ref().unwrap();
        assert_eq!(x_label.text, "Distance [m]");
        assert_eq!(x_label.position, (337.5, 300.0));
        let y_label = frame.y_label.as_ref().unwrap();
        assert_eq!(y_label.position, (35.0, 125.0));
        assert_eq!(y_label.rotation, -90.0);

        // Whole-pixel line ends on the plot corners.
        assert_eq!(frame.line, vec![(85.0, 250.0), (590.0, 149.0)]);

        let x_axis = frame.axis(AxisId::X).unwrap();
        assert_eq!(x_axis.origin, (0.0, 250.0));
        assert_eq!(x_axis.ticks.first().unwrap().label, "0");
        let grid = frame.axis(AxisId::YGrid).unwrap();
        assert_eq!(grid.tick_size, -505.0);
        assert!(grid.ticks.iter().all(|t| t.label.is_empty()));
        assert_eq!(chart.bbox().xmin, 0.0);
    }

    #[test]
    fn test_zoom() {
        let (mut chart, mut frame) = profile(&[(0.0, 0.0), (100.0, 10.0)]);
        // Pixel of x = 50 before rounding.
        let anchor = (337.5, 125.0);

        chart.zoom_start();
        assert_eq!(chart.cursor(), Cursor::Move);
        chart.zoom_by(2.0, anchor);
        chart.zoom_end();
        assert_eq!(chart.cursor(), Cursor::Crosshair);

        let bbox = chart.bbox();
        assert_relative_eq!(bbox.xmin, 25.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.xmax, 75.0, epsilon = 1e-9);
        let (y0, y1) = chart.base_y_scale().domain();
        assert_relative_eq!(bbox.ymax - bbox.ymin, (y1 - y0) / 2.0, epsilon = 1e-9);
        assert!(chart
            .filtered_data()
            .iter()
            .all(|&p| chart.bbox().contains(p)));

        // Re-applying the same gesture transform does not drift.
        let transform = chart.transform();
        chart.handle_zoom(transform);
        chart.handle_zoom(transform);
        assert_relative_eq!(chart.bbox().xmin, 25.0, epsilon = 1e-9);

        // Pointer inversion follows the zoomed scale.
        let (x, _) = chart.invert(anchor);
        assert_relative_eq!(x, 50.0, epsilon = 1e-9);

        chart.update_plot(CONTAINER, &mut frame);
        assert_relative_eq!(frame.line[0].0, 85.0 - 505.0 / 2.0, epsilon = 1.0);

        chart.reset_zoom();
        assert!(chart.transform().is_identity());
        assert_relative_eq!(chart.bbox().xmax, 100.0);
    }

    #[test]
    fn test_time_series() {
        assert_eq!(
            date_to_x(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()),
            SERIES_START
        );
        assert_eq!(
            date_to_x(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            SERIES_END
        );

        let mut chart = ChartView::new(ChartOptions::time_series());
        let dates = [(2002, 12.0), (2010, f64::NAN), (2019, 31.5)];
        chart.update_data(dates.iter().map(|&(year, z)| {
            (date_to_x(NaiveDate::from_ymd_opt(year, 6, 1).unwrap()), z)
        }));
        chart.set_timeline(chart.data().get(1).map(|&(x, _)| x));
        let mut frame = Frame::default();
        chart.update_plot(CONTAINER, &mut frame);

        let (x0, x1) = chart.x_scale().domain();
        assert_eq!(x_to_date(x0), NaiveDate::from_ymd_opt(2000, 1, 1));
        assert_eq!(x_to_date(x1), NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(chart.y_scale().domain(), (-5.0, 65.0));

        let x_axis = frame.x_axis.as_ref().unwrap();
        let labels: Vec<&str> = x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["2000", "2005", "2010", "2015", "2020", "2025"]);
        assert_eq!(frame.line.len(), 2);
        assert_relative_eq!(frame.timeline.unwrap(), frame.line[1].0);

        // Not zoomable.
        chart.zoom_by(2.0, (300.0, 100.0));
        assert!(chart.transform().is_identity());
    }
}
