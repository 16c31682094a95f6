//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod measure_agreement;
pub mod run_voting;
