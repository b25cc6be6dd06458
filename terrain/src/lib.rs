//! Terrain profiles and height time series.
//!
//! A [`Profile`] walks a drawn line at a fixed step, sampling the
//! active height model at every step. A [`TimeSeries`] samples every
//! survey year at a single location.

mod error;
mod math;
mod path;
mod profile;
mod series;

pub use crate::{
    error::TerrainError,
    math::cumulative_distance,
    path::{coord_at_distance, coord_at_fraction, interpolate, PathIter},
    profile::{Profile, ProfileBuilder},
    series::TimeSeries,
};
pub use {dhm, geo};
