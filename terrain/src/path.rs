//! Evenly spaced sampling along polylines.

use crate::TerrainError;
use geo::{Coord, CoordFloat, EuclideanLength, LineString};
use num_traits::{FromPrimitive, ToPrimitive};
use std::iter::Sum;

/// Iterator over points spaced `step` apart along a polyline,
/// measured along the line itself.
///
/// Yields `floor(length / step)` points, the first being the line's
/// first vertex. The last vertex is never yielded: point `i` lies at
/// distance `i * step` and `(n - 1) * step < length`.
pub struct PathIter<'a, T: CoordFloat = f64> {
    line: &'a LineString<T>,
    length: T,
    step: T,
    total_points: usize,
    current_point: usize,

    /// Index of the segment containing the next point.
    segment: usize,

    /// Line length before `segment`.
    walked: T,
}

impl<'a, T> PathIter<'a, T>
where
    T: CoordFloat + FromPrimitive + Sum,
{
    pub fn new(line: &'a LineString<T>, step: T) -> Result<Self, TerrainError> {
        if !(step.is_finite() && step > T::zero()) {
            return Err(TerrainError::InvalidStep(
                step.to_f64().unwrap_or(f64::NAN),
            ));
        }
        let length = line.euclidean_length();
        if !(length.is_finite() && length > T::zero()) {
            return Err(TerrainError::DegenerateGeometry);
        }
        let total_points = (length / step).floor().to_usize().unwrap_or(0);
        if total_points == 0 {
            return Err(TerrainError::InsufficientLength {
                length: length.to_f64().unwrap_or(f64::NAN),
                step: step.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            line,
            length,
            step,
            total_points,
            current_point: 0,
            segment: 0,
            walked: T::zero(),
        })
    }

    /// Returns the total length of the line.
    pub fn length(&self) -> T {
        self.length
    }
}

impl<'a, T: CoordFloat + FromPrimitive> Iterator for PathIter<'a, T> {
    type Item = Coord<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_point >= self.total_points {
            return None;
        }
        let target = T::from_usize(self.current_point)? * self.step;
        self.current_point += 1;

        let coords = &self.line.0;
        while self.segment + 1 < coords.len() {
            let (start, end) = (coords[self.segment], coords[self.segment + 1]);
            let len = segment_length(start, end);
            if len > T::zero() && self.walked + len >= target {
                return Some(lerp(start, end, (target - self.walked) / len));
            }
            self.walked = self.walked + len;
            self.segment += 1;
        }
        coords.last().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_points - self.current_point;
        (remaining, Some(remaining))
    }
}

impl<'a, T: CoordFloat + FromPrimitive> ExactSizeIterator for PathIter<'a, T> {}

/// Returns the points spaced `step` apart along `line`.
///
/// See [`PathIter`] for the sample count convention.
pub fn interpolate<T>(line: &LineString<T>, step: T) -> Result<Vec<Coord<T>>, TerrainError>
where
    T: CoordFloat + FromPrimitive + Sum,
{
    Ok(PathIter::new(line, step)?.collect())
}

/// Returns the coordinate at `fraction` (clamped to `[0, 1]`) of the
/// way along `line`, weighting segments by their length.
///
/// Returns `None` for an empty line or a `NaN` fraction.
pub fn coord_at_fraction<T>(line: &LineString<T>, fraction: T) -> Option<Coord<T>>
where
    T: CoordFloat + Sum,
{
    if fraction.is_nan() {
        return None;
    }
    let first = *line.0.first()?;
    let length = line.euclidean_length();
    if length <= T::zero() || fraction <= T::zero() {
        return Some(first);
    }
    if fraction >= T::one() {
        return line.0.last().copied();
    }
    let target = length * fraction;
    let mut walked = T::zero();
    for pair in line.0.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let len = segment_length(start, end);
        if len > T::zero() && walked + len >= target {
            return Some(lerp(start, end, (target - walked) / len));
        }
        walked = walked + len;
    }
    line.0.last().copied()
}

/// Returns the coordinate `distance` map units along `line`.
pub fn coord_at_distance<T>(line: &LineString<T>, distance: T) -> Option<Coord<T>>
where
    T: CoordFloat + Sum,
{
    let length = line.euclidean_length();
    if length <= T::zero() {
        return line.0.first().copied();
    }
    coord_at_fraction(line, distance / length)
}

fn segment_length<T: CoordFloat>(start: Coord<T>, end: Coord<T>) -> T {
    let Coord { x: dx, y: dy } = end - start;
    dx.hypot(dy)
}

fn lerp<T: CoordFloat>(start: Coord<T>, end: Coord<T>, t: T) -> Coord<T> {
    if t >= T::one() {
        end
    } else {
        start + (end - start) * t
    }
}

#[cfg(test)]
mod tests {
    use super::{coord_at_distance, coord_at_fraction, interpolate, PathIter};
    use crate::{cumulative_distance, TerrainError};
    use approx::assert_relative_eq;
    use geo::{coord, line_string, LineString};

    #[test]
    fn test_straight_line() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let iter = PathIter::new(&line, 0.5).unwrap();
        assert_eq!(iter.len(), 20);
        let points: Vec<_> = iter.collect();
        assert_eq!(points.len(), 20);
        let distances = cumulative_distance(&points);
        for (i, (point, distance)) in points.iter().zip(&distances).enumerate() {
            let expected = f64::from(u32::try_from(i).unwrap()) * 0.5;
            assert_relative_eq!(point.x, expected, epsilon = 1e-12);
            assert_relative_eq!(point.y, 0.0);
            assert_relative_eq!(*distance, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sample_count_is_floor() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        assert_eq!(interpolate(&line, 3.0).unwrap().len(), 3);
        assert_eq!(interpolate(&line, 10.0).unwrap().len(), 1);
        assert_eq!(interpolate(&line, 0.1).unwrap().len(), 100);
        // 7.5 / 2.5 is exactly 3.
        let line = line_string![(x: 0.0, y: 0.0), (x: 4.5, y: 6.0)];
        assert_eq!(interpolate(&line, 2.5).unwrap().len(), 3);
    }

    #[test]
    fn test_multi_segment() {
        // An L shape, 3 units east then 4 units north.
        let line = line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 4.0)];
        let points = interpolate(&line, 1.0).unwrap();
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], coord!(x: 0.0, y: 0.0));
        assert_relative_eq!(points[3].x, 3.0);
        assert_relative_eq!(points[3].y, 0.0);
        assert_relative_eq!(points[5].x, 3.0);
        assert_relative_eq!(points[5].y, 2.0);

        let d = cumulative_distance(&points);
        for pair in d.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
        ];
        let points = interpolate(&line, 1.0).unwrap();
        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[3].y, 1.0);
    }

    #[test]
    fn test_errors() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        assert!(matches!(
            interpolate(&line, 0.0),
            Err(TerrainError::InvalidStep(_))
        ));
        assert!(matches!(
            interpolate(&line, f64::NAN),
            Err(TerrainError::InvalidStep(_))
        ));
        assert!(matches!(
            interpolate(&line, 1.5),
            Err(TerrainError::InsufficientLength { .. })
        ));

        let point = line_string![(x: 4.0, y: 4.0), (x: 4.0, y: 4.0)];
        assert!(matches!(
            interpolate(&point, 0.5),
            Err(TerrainError::DegenerateGeometry)
        ));
        let empty: LineString<f64> = LineString::new(vec![]);
        assert!(matches!(
            interpolate(&empty, 0.5),
            Err(TerrainError::DegenerateGeometry)
        ));
    }

    #[test]
    fn test_coord_at_fraction_end_points() {
        let line = line_string![
            (x: 2_560_000.3, y: 1_205_000.7),
            (x: 2_560_013.1, y: 1_205_021.9),
            (x: 2_560_040.0, y: 1_205_003.3),
        ];
        assert_eq!(coord_at_fraction(&line, 0.0), line.0.first().copied());
        let end = coord_at_fraction(&line, 1.0).unwrap();
        let last = *line.0.last().unwrap();
        assert_relative_eq!(end.x, last.x);
        assert_relative_eq!(end.y, last.y);
        // Clamped.
        assert_eq!(coord_at_fraction(&line, 2.0), Some(last));
        assert_eq!(coord_at_fraction(&line, -1.0), line.0.first().copied());
        assert_eq!(coord_at_fraction(&line, f64::NAN), None);
    }

    #[test]
    fn test_coord_at_distance() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 4.0)];
        let c = coord_at_distance(&line, 5.0).unwrap();
        assert_relative_eq!(c.x, 3.0);
        assert_relative_eq!(c.y, 2.0);
    }

    #[test]
    fn test_f32() {
        let line: LineString<f32> = line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 2.0)];
        let points = interpolate(&line, 0.5_f32).unwrap();
        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[3].y, 1.5_f32);
    }
}
