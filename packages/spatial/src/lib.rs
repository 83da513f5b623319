#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared spatial machinery for the ward air-quality pipeline.
//!
//! Three concerns live here: reprojection from geographic lon/lat into a
//! metric UTM plane ([`proj`]), R-tree nearest-neighbor lookup of sensor
//! stations ([`nearest`]), and buffered intersection queries against
//! infrastructure layers ([`features`]). All distance math happens in the
//! projected plane, in meters.

pub mod features;
pub mod nearest;
pub mod proj;

pub use features::{FeatureGeometry, FeatureIndex};
pub use nearest::{NearestStation, StationLocator};
pub use proj::{MetricProjection, ProjectionError};
