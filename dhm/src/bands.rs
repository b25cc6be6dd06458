use crate::C;

/// Decoded values of one pixel, indexed by band (0-based).
///
/// Bands without valid data hold `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandValues(Vec<C>);

impl BandValues {
    pub fn new(values: Vec<C>) -> Self {
        Self(values)
    }

    /// Returns the value of `band`, or `None` if the pixel has no
    /// such band.
    pub fn band(&self, band: usize) -> Option<C> {
        self.0.get(band).copied()
    }

    /// Returns the number of bands.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no band holds a numeric value.
    pub fn is_nodata(&self) -> bool {
        self.0.iter().all(|value| value.is_nan())
    }

    pub fn iter(&self) -> impl Iterator<Item = C> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<C>> for BandValues {
    fn from(values: Vec<C>) -> Self {
        Self(values)
    }
}
