//! Voting / consensus engine
//!
//! Each category runs the same pipeline: ingestion into ordered candidates,
//! clustering (span IOU for tokens and entities, exact key for
//! dependencies), quorum resolution, and merge.

pub mod candidate;
pub mod clustering;
pub mod config;
pub mod engine;
pub mod grouping;
pub mod merger;
pub mod resolver;
pub mod result;

pub use config::{MatchingMode, VotingConfig};
pub use engine::VotingEngine;
pub use result::{CategoryVote, SkipReason, SkippedAnnotation, VotingResult};
