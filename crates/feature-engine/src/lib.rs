//! Feature Engineering Engine
//!
//! Converts raw stroke samples into fixed-length statistical feature
//! vectors for signature verification.

mod derivatives;
mod features;
mod histogram;
mod polar;

pub use derivatives::{derivatives, first_difference, DerivativeSet};
pub use features::{FeatureExtractor, FeatureVector, FEATURE_DIMENSION};
pub use histogram::{hist1d, hist2d, BinRange, FrequencyMode};
pub use polar::{to_polar, PolarPair};
