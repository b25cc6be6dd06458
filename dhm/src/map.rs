use crate::C;
use geo::geometry::Coord;

/// Coordinate transforms provided by a map engine.
pub trait MapView {
    /// Returns the screen pixel showing `coord`, or `None` before the
    /// map has rendered a frame.
    fn pixel_from_coord(&self, coord: Coord<C>) -> Option<Coord<C>>;

    /// Returns the map coordinate under `pixel`.
    fn coord_from_pixel(&self, pixel: Coord<C>) -> Coord<C>;

    /// Returns the map coordinate at the centre of the view.
    fn center(&self) -> Coord<C>;
}

/// A north-up map view.
///
/// Pixel `(0, 0)` is the top-left corner of the view; pixel `y`
/// grows downwards while map `y` grows upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Map coordinate at the centre of the view.
    center: Coord<C>,

    /// Map units per pixel.
    resolution: C,

    /// View size in pixels (width, height).
    size: (C, C),
}

impl Viewport {
    pub fn new(center: Coord<C>, resolution: C, size: (C, C)) -> Self {
        Self {
            center,
            resolution,
            size,
        }
    }

    /// Recentres the view on `center`.
    pub fn pan_to(&mut self, center: Coord<C>) {
        self.center = center;
    }

    /// Moves the view by a pixel offset, as a drag gesture does.
    pub fn drag_by(&mut self, dx_px: C, dy_px: C) {
        self.center = Coord {
            x: self.center.x - dx_px * self.resolution,
            y: self.center.y + dy_px * self.resolution,
        };
    }

    /// Returns `true` if `pixel` lies inside the view.
    pub fn contains_pixel(&self, pixel: Coord<C>) -> bool {
        let (width, height) = self.size;
        (0.0..width).contains(&pixel.x) && (0.0..height).contains(&pixel.y)
    }
}

impl MapView for Viewport {
    fn pixel_from_coord(&self, coord: Coord<C>) -> Option<Coord<C>> {
        let (width, height) = self.size;
        Some(Coord {
            x: (coord.x - self.center.x) / self.resolution + width / 2.0,
            y: (self.center.y - coord.y) / self.resolution + height / 2.0,
        })
    }

    fn coord_from_pixel(&self, pixel: Coord<C>) -> Coord<C> {
        let (width, height) = self.size;
        Coord {
            x: self.center.x + (pixel.x - width / 2.0) * self.resolution,
            y: self.center.y - (pixel.y - height / 2.0) * self.resolution,
        }
    }

    fn center(&self) -> Coord<C> {
        self.center
    }
}
