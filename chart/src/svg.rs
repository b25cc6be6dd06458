use crate::{Axis, AxisId, ChartError, Cursor, Frame, Label, LabelId, Orient, PixelRect, Surface};
use plotters::{
    coord::Shift,
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontDesc, FontFamily, FontStyle, FontTransform,
    },
};
use std::path::Path;

/// Room around the viewbox for titles placed outside the plot.
const PADDING: f64 = 60.0;

/// Gap between a tick and its label.
const LABEL_GAP: f64 = 3.0;

const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);
const LINE_COLOR: RGBColor = RGBColor(30, 144, 255);
const TIMELINE_COLOR: RGBColor = RGBColor(200, 0, 100);

/// A [`Surface`] that renders its latest [`Frame`] to SVG.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    frame: Frame,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Renders the current frame to an SVG document.
    pub fn render(&self) -> Result<String, ChartError> {
        let frame = &self.frame;
        let (width, height) = frame.viewbox;
        let size = (
            to_px(width + 2.0 * PADDING).max(1).unsigned_abs(),
            to_px(height + 2.0 * PADDING).max(1).unsigned_abs(),
        );
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;
            for grid in [&frame.x_grid, &frame.y_grid].into_iter().flatten() {
                draw_axis(&root, grid, &GRID_COLOR)?;
            }
            let style = ShapeStyle::from(&LINE_COLOR).stroke_width(2);
            for run in clip_polyline(&frame.line, frame.clip) {
                let run: Vec<_> = run.into_iter().map(to_point).collect();
                root.draw(&PathElement::new(run, style))
                    .map_err(render_error)?;
            }
            if let Some(x) = frame.timeline {
                let clip = frame.clip;
                let style = ShapeStyle::from(&TIMELINE_COLOR).stroke_width(2);
                root.draw(&PathElement::new(
                    vec![to_point((x, clip.y)), to_point((x, clip.y + clip.height))],
                    style,
                ))
                .map_err(render_error)?;
            }
            for axis in [&frame.x_axis, &frame.y_axis].into_iter().flatten() {
                draw_axis(&root, axis, &BLACK)?;
            }
            for label in [&frame.x_label, &frame.y_label].into_iter().flatten() {
                draw_label(&root, label)?;
            }
            root.present().map_err(render_error)?;
        }
        Ok(svg)
    }

    /// Renders the current frame to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ChartError> {
        std::fs::write(path, self.render()?)?;
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn set_viewbox(&mut self, width: f64, height: f64) {
        self.frame.set_viewbox(width, height);
    }

    fn set_body(&mut self, rect: PixelRect, cursor: Cursor) {
        self.frame.set_body(rect, cursor);
    }

    fn set_clip(&mut self, rect: PixelRect) {
        self.frame.set_clip(rect);
    }

    fn set_axis(&mut self, id: AxisId, axis: Axis) {
        self.frame.set_axis(id, axis);
    }

    fn set_label(&mut self, id: LabelId, label: Label) {
        self.frame.set_label(id, label);
    }

    fn set_line(&mut self, points: Vec<(f64, f64)>) {
        self.frame.set_line(points);
    }

    fn set_timeline(&mut self, x: Option<f64>) {
        self.frame.set_timeline(x);
    }
}

fn render_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

#[allow(clippy::cast_possible_truncation)]
fn to_px(v: f64) -> i32 {
    v.round() as i32
}

fn to_point((x, y): (f64, f64)) -> (i32, i32) {
    (to_px(x + PADDING), to_px(y + PADDING))
}

/// Points to pixels.
fn font(size_pt: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size_pt * 4.0 / 3.0, FontStyle::Normal)
}

fn draw_axis<DB>(
    root: &DrawingArea<DB, Shift>,
    axis: &Axis,
    color: &RGBColor,
) -> Result<(), ChartError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (ox, oy) = axis.origin;
    let (r0, r1) = axis.range;
    let style = ShapeStyle::from(color).stroke_width(1);
    let size = axis.tick_size;

    if size >= 0.0 {
        let domain = match axis.orient {
            Orient::Bottom => vec![(ox + r0, oy), (ox + r1, oy)],
            Orient::Left => vec![(ox, oy + r0), (ox, oy + r1)],
        };
        root.draw(&PathElement::new(
            domain.into_iter().map(to_point).collect::<Vec<_>>(),
            style,
        ))
        .map_err(render_error)?;
    }

    for tick in &axis.ticks {
        let p = tick.position;
        let (start, end, label_at, anchor) = match axis.orient {
            Orient::Bottom => (
                (ox + p, oy),
                (ox + p, oy + size),
                (ox + p, oy + size.max(0.0) + LABEL_GAP),
                Pos::new(HPos::Center, VPos::Top),
            ),
            Orient::Left => (
                (ox, oy + p),
                (ox - size, oy + p),
                (ox - size.max(0.0) - LABEL_GAP, oy + p),
                Pos::new(HPos::Right, VPos::Center),
            ),
        };
        root.draw(&PathElement::new(vec![to_point(start), to_point(end)], style))
            .map_err(render_error)?;
        if !tick.label.is_empty() {
            let text_style = TextStyle::from(font(axis.font_size)).pos(anchor);
            root.draw(&Text::new(tick.label.as_str(), to_point(label_at), text_style))
                .map_err(render_error)?;
        }
    }
    Ok(())
}

fn draw_label<DB>(root: &DrawingArea<DB, Shift>, label: &Label) -> Result<(), ChartError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut font = font(label.font_size);
    if label.rotation != 0.0 {
        font = font.transform(FontTransform::Rotate270);
    }
    let style = TextStyle::from(font).pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(label.text.as_str(), to_point(label.position), style))
        .map_err(render_error)
}

/// Splits `points` into runs of segments clipped to `rect`.
fn clip_polyline(points: &[(f64, f64)], rect: PixelRect) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for pair in points.windows(2) {
        match clip_segment(pair[0], pair[1], rect) {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    }
                    current = vec![start];
                }
                current.push(end);
            }
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

/// Liang-Barsky segment clipping.
fn clip_segment(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    rect: PixelRect,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, x0 - rect.x),
        (dx, rect.x + rect.width - x0),
        (-dy, y0 - rect.y),
        (dy, rect.y + rect.height - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        (x0 + t0 * dx, y0 + t0 * dy),
        (x0 + t1 * dx, y0 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::{clip_polyline, SvgSurface};
    use crate::{ChartOptions, ChartView, PixelRect};
    use approx::assert_relative_eq;

    #[test]
    fn test_render() {
        let mut chart = ChartView::new(ChartOptions::profile());
        chart.update_data(vec![(0.0, 400.0), (5.0, 402.5), (10.0, 401.0)]);
        let mut surface = SvgSurface::new();
        chart.update_plot((650.0, 300.0), &mut surface);
        assert_eq!(surface.frame().line.len(), 3);

        let svg = surface.render().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Distance [m]"));
        assert!(svg.contains("Height [m]"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_clip_polyline() {
        let rect = PixelRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        // In, out, back in.
        let runs = clip_polyline(
            &[(2.0, 5.0), (8.0, 5.0), (20.0, 5.0), (8.0, 6.0), (5.0, 6.0)],
            rect,
        );
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0][..2], [(2.0, 5.0), (8.0, 5.0)]);
        assert_eq!(runs[0].len(), 3);
        assert_relative_eq!(runs[0][2].0, 10.0, epsilon = 1e-9);
        assert_eq!(runs[1].last(), Some(&(5.0, 6.0)));
        assert_relative_eq!(runs[1][0].0, 10.0, epsilon = 1e-9);

        assert!(clip_polyline(&[(20.0, 20.0), (30.0, 30.0)], rect).is_empty());
        assert!(clip_polyline(&[(5.0, 5.0)], rect).is_empty());
    }
}
