//! Confidence aggregation
//!
//! Reduces the confidences of the members of an accepted group to a single
//! score. The free functions in [`aggregate`] are pure and safe to call
//! concurrently; [`ConfidenceStrategy`] selects one of them by name at
//! configuration time.

pub mod aggregate;
pub mod strategy;

pub use strategy::ConfidenceStrategy;
