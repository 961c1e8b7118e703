//! Standard line normalizer.
//!
//! This module provides the `StandardNormalizer`, which decodes the
//! identifier format shared by every channel supported today.

mod adapter;

pub use adapter::StandardNormalizer;
