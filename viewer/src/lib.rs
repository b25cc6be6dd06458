//! Terrain profile and height time series viewers.
//!
//! A [`ViewerController`] ties a map view, a raster tile layer, a
//! vector feature store, and a chart together. Which chart it shows
//! and how selecting a survey year changes the layer is decided by
//! the [`ViewerMode`] in its [`ViewerConfig`].

mod config;
mod controller;
mod error;
mod features;

pub use crate::{
    config::{Activation, ViewerConfig, ViewerMode, DEFAULT_NUDGE, DEFAULT_STEP},
    controller::{ArrowKey, Event, ViewerController, ViewerState},
    error::ViewerError,
    features::{line_from_geojson, to_feature_collection, Feature, FeatureStore, VecFeatureStore},
};
pub use {chart, dhm, terrain};
