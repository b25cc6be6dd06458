use crate::{math::cumulative_distance, path::PathIter, TerrainError};
use dhm::{PointSampler, C};
use geo::{geometry::Coord, LineString};
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Total length of the drawn line in map units.
    pub length: C,

    /// Sample locations, `step_size` apart along the line.
    pub points: Vec<Coord<C>>,

    /// Curvilinear distance of each sample from the line's start.
    pub distances: Vec<C>,

    /// Height at each sample; `NaN` where the raster had no data.
    pub elevations: Vec<C>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            line: None,
            step_size: None,
            band: 0,
        }
    }

    /// Returns the number of samples, including those without data.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `(distance, elevation)` pairs, index-aligned with
    /// `points`. Samples without data keep their `NaN` elevation.
    pub fn series(&self) -> Vec<(C, C)> {
        self.distances
            .iter()
            .copied()
            .zip(self.elevations.iter().copied())
            .collect()
    }
}

pub struct ProfileBuilder {
    /// Drawn line (required).
    line: Option<LineString<C>>,

    /// Distance between samples along the line (required).
    step_size: Option<C>,

    /// Band to read from each sample (defaults to 0).
    band: usize,
}

impl ProfileBuilder {
    /// Drawn line (required).
    #[must_use]
    pub fn line(mut self, line: LineString<C>) -> Self {
        self.line = Some(line);
        self
    }

    /// Distance between samples along the line (required).
    #[must_use]
    pub fn step_size(mut self, step: C) -> Self {
        self.step_size = Some(step);
        self
    }

    /// Band to read from each sample (defaults to 0).
    #[must_use]
    pub fn band(mut self, band: usize) -> Self {
        self.band = band;
        self
    }

    /// Samples `sampler` along the line.
    ///
    /// Geometry errors are returned as-is; a line that cannot be
    /// walked never produces an empty profile.
    pub fn build<S>(&self, sampler: &S) -> Result<Profile, TerrainError>
    where
        S: PointSampler + ?Sized,
    {
        let line = self.line.as_ref().ok_or(TerrainError::Builder("line"))?;
        let step_size = self.step_size.ok_or(TerrainError::Builder("step_size"))?;

        let (points, length, path_runtime) = {
            let now = std::time::Instant::now();
            let path = PathIter::new(line, step_size)?;
            let length = path.length();
            let points: Vec<Coord<C>> = path.collect();
            (points, length, now.elapsed())
        };

        let distances = cumulative_distance(&points);

        let (elevations, terrain_runtime) = {
            let now = std::time::Instant::now();
            let elevations: Vec<C> = points
                .iter()
                .map(|&point| {
                    sampler
                        .sample_at(point)
                        .and_then(|values| values.band(self.band))
                        .unwrap_or(C::NAN)
                })
                .collect();
            (elevations, now.elapsed())
        };

        debug!(
            "profile; len: {}, nodata: {}, path_exec: {:?}, terrain_exec: {:?}",
            points.len(),
            elevations.iter().filter(|z| z.is_nan()).count(),
            path_runtime,
            terrain_runtime
        );

        Ok(Profile {
            length,
            points,
            distances,
            elevations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Profile;
    use crate::TerrainError;
    use approx::assert_relative_eq;
    use dhm::BandValues;
    use geo::{line_string, Coord};

    /// A tilted plane: height is `x / 2`, second band is `100 + y`.
    fn plane(coord: Coord) -> Option<BandValues> {
        Some(BandValues::new(vec![coord.x / 2.0, 100.0 + coord.y]))
    }

    #[test]
    fn test_profile() {
        let profile = Profile::builder()
            .line(line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)])
            .step_size(0.5)
            .build(&plane)
            .unwrap();
        assert_eq!(profile.len(), 20);
        assert_relative_eq!(profile.length, 10.0);
        let series = profile.series();
        assert_relative_eq!(series[0].0, 0.0);
        assert_relative_eq!(series[19].0, 9.5, epsilon = 1e-12);
        assert_relative_eq!(series[19].1, 4.75, epsilon = 1e-12);
    }

    #[test]
    fn test_band() {
        let profile = Profile::builder()
            .line(line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 4.0)])
            .step_size(1.0)
            .band(1)
            .build(&plane)
            .unwrap();
        assert_eq!(profile.elevations, vec![100.0, 101.0, 102.0, 103.0]);

        // A band the raster does not have.
        let profile = Profile::builder()
            .line(line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 4.0)])
            .step_size(1.0)
            .band(7)
            .build(&plane)
            .unwrap();
        assert!(profile.elevations.iter().all(|z| z.is_nan()));
    }

    #[test]
    fn test_missing_samples_keep_index() {
        let holes = |coord: Coord| {
            let i = (coord.x / 0.5).round();
            if i == 5.0 || i == 12.0 {
                None
            } else {
                plane(coord)
            }
        };
        let profile = Profile::builder()
            .line(line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)])
            .step_size(0.5)
            .build(&holes)
            .unwrap();
        let series = profile.series();
        assert_eq!(series.len(), 20);
        assert!(series[5].1.is_nan());
        assert!(series[12].1.is_nan());
        assert_eq!(series.iter().filter(|(_, z)| !z.is_nan()).count(), 18);
    }

    #[test]
    fn test_errors_propagate() {
        let err = Profile::builder()
            .step_size(0.5)
            .build(&plane)
            .unwrap_err();
        assert!(matches!(err, TerrainError::Builder("line")));

        let err = Profile::builder()
            .line(line_string![(x: 1.0, y: 1.0), (x: 1.0, y: 1.0)])
            .step_size(0.5)
            .build(&plane)
            .unwrap_err();
        assert!(matches!(err, TerrainError::DegenerateGeometry));

        let err = Profile::builder()
            .line(line_string![(x: 0.0, y: 0.0), (x: 0.2, y: 0.0)])
            .step_size(0.5)
            .build(&plane)
            .unwrap_err();
        assert!(matches!(err, TerrainError::InsufficientLength { .. }));
    }
}
