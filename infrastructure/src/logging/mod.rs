//! Logging infrastructure: structured voting event logs.
//!
//! Provides [`JsonlVotingLogger`], a JSONL file writer that implements
//! the [`VotingObserver`](nlp_quorum_application::VotingObserver) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlVotingLogger;
