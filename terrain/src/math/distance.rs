use geo::{Coord, CoordFloat};

/// Returns the running Euclidean distance along `points`.
///
/// The first entry is always zero; entry `i` is the length of the
/// polyline from `points[0]` to `points[i]`.
pub fn cumulative_distance<T: CoordFloat>(points: &[Coord<T>]) -> Vec<T> {
    let mut distances = Vec::with_capacity(points.len());
    let mut total = T::zero();
    let mut prev: Option<Coord<T>> = None;
    for &point in points {
        if let Some(prev) = prev {
            let Coord { x: dx, y: dy } = point - prev;
            total = total + (dx * dx + dy * dy).sqrt();
        }
        distances.push(total);
        prev = Some(point);
    }
    distances
}
