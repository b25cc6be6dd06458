use crate::LinearScale;

/// A pan/zoom gesture state: uniform scale `k` followed by a pixel
/// translation `(x, y)`.
///
/// A pixel `p` of the untransformed chart is shown at `p * k + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ZoomTransform {
    pub const fn identity() -> Self {
        Self {
            k: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Returns this transform zoomed by `factor`, keeping the pixel
    /// under `anchor` in place.
    #[must_use]
    pub fn scale_by(&self, factor: f64, anchor: (f64, f64)) -> Self {
        let k = self.k * factor;
        if !(k.is_finite() && k > 0.0) {
            return *self;
        }
        let (px, py) = anchor;
        let (ux, uy) = (self.invert_x(px), self.invert_y(py));
        Self {
            k,
            x: px - ux * k,
            y: py - uy * k,
        }
    }

    /// Returns this transform moved by a pixel offset.
    #[must_use]
    pub fn pan_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn apply(&self, (px, py): (f64, f64)) -> (f64, f64) {
        (px * self.k + self.x, py * self.k + self.y)
    }

    pub fn invert_x(&self, px: f64) -> f64 {
        (px - self.x) / self.k
    }

    pub fn invert_y(&self, py: f64) -> f64 {
        (py - self.y) / self.k
    }

    /// Returns `scale` with its domain replaced by the data interval
    /// now visible across its pixel range.
    pub fn rescale_x(&self, scale: &LinearScale) -> LinearScale {
        let (r0, r1) = scale.range();
        scale.with_domain((
            scale.invert(self.invert_x(r0)),
            scale.invert(self.invert_x(r1)),
        ))
    }

    /// Same as [`ZoomTransform::rescale_x`], along y.
    pub fn rescale_y(&self, scale: &LinearScale) -> LinearScale {
        let (r0, r1) = scale.range();
        scale.with_domain((
            scale.invert(self.invert_y(r0)),
            scale.invert(self.invert_y(r1)),
        ))
    }
}
