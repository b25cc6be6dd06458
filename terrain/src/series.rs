use chrono::NaiveDate;
use dhm::{PointSampler, RasterSource, C};
use geo::geometry::Coord;
use log::debug;

/// Heights at one location across every dated source.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub location: Coord<C>,

    /// `(date, height)` per source, in catalog order. Height is `NaN`
    /// where the band had no data.
    pub entries: Vec<(NaiveDate, C)>,
}

impl TimeSeries {
    /// Samples every band at `location`, pairing band `i` with
    /// `sources[i]`.
    ///
    /// Returns `None` when nothing is loaded at `location`.
    pub fn sample<S>(location: Coord<C>, sources: &[RasterSource], sampler: &S) -> Option<Self>
    where
        S: PointSampler + ?Sized,
    {
        let values = sampler.sample_at(location)?;
        if values.len() != sources.len() {
            debug!(
                "band count {} differs from source count {}",
                values.len(),
                sources.len()
            );
        }
        let entries = sources
            .iter()
            .enumerate()
            .map(|(i, source)| (source.date, values.band(i).unwrap_or(C::NAN)))
            .collect();
        Some(Self { location, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the height of entry `index`, `None` when out of range.
    pub fn value(&self, index: usize) -> Option<C> {
        self.entries.get(index).map(|&(_, z)| z)
    }

    pub fn heights(&self) -> impl Iterator<Item = C> + '_ {
        self.entries.iter().map(|&(_, z)| z)
    }
}
