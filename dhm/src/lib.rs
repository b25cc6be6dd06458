//! Digital height model (DHM) raster plumbing.
//!
//! This crate holds everything needed to answer "what is the height
//! at this map coordinate?":
//!
//! - [`RasterSource`] descriptors for the survey years a viewer can
//!   display.
//! - The collaborator traits a map engine provides ([`MapView`],
//!   [`TileLayer`], [`MetadataSource`]).
//! - [`RasterSampler`], which routes a map coordinate through the
//!   view's pixel transform into the active layer's decoded data.
//! - Reference implementations of those collaborators backed by
//!   in-memory [`Grid`]s.

mod bands;
mod error;
mod grid;
mod layer;
mod map;
mod metadata;
mod sampler;
mod source;

pub use crate::{
    bands::BandValues,
    error::DhmError,
    grid::Grid,
    layer::{GridLayer, StyleVariables, TileLayer},
    map::{MapView, Viewport},
    metadata::{InitialView, MetadataSource, SourceMetadata},
    sampler::{PointSampler, RasterSampler},
    source::{parse_date, RasterSource, DATE_FORMAT},
};
pub use geo;

/// Base floating point type used for all map coordinates and
/// sampled values.
pub type C = f64;
