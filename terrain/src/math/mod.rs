mod distance;

pub use distance::cumulative_distance;
