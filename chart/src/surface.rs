//! Where a chart draws to.

/// Pixel-space rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Crosshair,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    X,
    Y,
    XGrid,
    YGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelId {
    X,
    Y,
}

/// Which side of the plot an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel offset along the axis.
    pub position: f64,

    /// Empty for gridlines.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: Orient,

    /// Pixel position of the axis line's origin.
    pub origin: (f64, f64),

    /// Pixel extent of the axis line.
    pub range: (f64, f64),

    pub ticks: Vec<Tick>,

    /// Tick length, pointing away from the plot. Negative lengths
    /// reach across the plot and draw gridlines.
    pub tick_size: f64,

    /// Font size in points.
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,

    /// Anchor position (text centre) in pixels.
    pub position: (f64, f64),

    /// Clockwise rotation in degrees.
    pub rotation: f64,

    /// Font size in points.
    pub font_size: f64,
}

/// A retained drawing target.
///
/// Every setter replaces the previous state of its element, so
/// calling the same setter twice with the same value is a no-op.
pub trait Surface {
    fn set_viewbox(&mut self, width: f64, height: f64);
    fn set_body(&mut self, rect: PixelRect, cursor: Cursor);
    fn set_clip(&mut self, rect: PixelRect);
    fn set_axis(&mut self, id: AxisId, axis: Axis);
    fn set_label(&mut self, id: LabelId, label: Label);

    /// Sets the data path in pixels.
    fn set_line(&mut self, points: Vec<(f64, f64)>);

    /// Shows a vertical marker at pixel `x`, or hides it.
    fn set_timeline(&mut self, x: Option<f64>);
}

/// The most recent state pushed to each chart element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub viewbox: (f64, f64),
    pub body: PixelRect,
    pub cursor: Cursor,
    pub clip: PixelRect,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub x_grid: Option<Axis>,
    pub y_grid: Option<Axis>,
    pub x_label: Option<Label>,
    pub y_label: Option<Label>,
    pub line: Vec<(f64, f64)>,
    pub timeline: Option<f64>,
}

impl Frame {
    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        match id {
            AxisId::X => self.x_axis.as_ref(),
            AxisId::Y => self.y_axis.as_ref(),
            AxisId::XGrid => self.x_grid.as_ref(),
            AxisId::YGrid => self.y_grid.as_ref(),
        }
    }
}

impl Surface for Frame {
    fn set_viewbox(&mut self, width: f64, height: f64) {
        self.viewbox = (width, height);
    }

    fn set_body(&mut self, rect: PixelRect, cursor: Cursor) {
        self.body = rect;
        self.cursor = cursor;
    }

    fn set_clip(&mut self, rect: PixelRect) {
        self.clip = rect;
    }

    fn set_axis(&mut self, id: AxisId, axis: Axis) {
        let slot = match id {
            AxisId::X => &mut self.x_axis,
            AxisId::Y => &mut self.y_axis,
            AxisId::XGrid => &mut self.x_grid,
            AxisId::YGrid => &mut self.y_grid,
        };
        *slot = Some(axis);
    }

    fn set_label(&mut self, id: LabelId, label: Label) {
        match id {
            LabelId::X => self.x_label = Some(label),
            LabelId::Y => self.y_label = Some(label),
        }
    }

    fn set_line(&mut self, points: Vec<(f64, f64)>) {
        self.line = points;
    }

    fn set_timeline(&mut self, x: Option<f64>) {
        self.timeline = x;
    }
}
