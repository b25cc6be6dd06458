//! Line charts whose scales, zoom, and layout are plain state.
//!
//! A [`ChartView`] derives everything it draws from its dimensions,
//! margins, data, view window, and zoom transform, and pushes the
//! result to a [`Surface`] one element at a time.

mod error;
mod scale;
mod surface;
mod svg;
mod time;
mod transform;
mod view;

pub use crate::{
    error::ChartError,
    scale::LinearScale,
    surface::{Axis, AxisId, Cursor, Frame, Label, LabelId, Orient, PixelRect, Surface, Tick},
    svg::SvgSurface,
    time::{date_to_x, nice_years, x_to_date, year_ticks},
    transform::ZoomTransform,
    view::{AxisOptions, BBox, ChartOptions, ChartView, DomainMode, Margins, TickFormat},
};
