//! Application layer for nlp-quorum
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    output_loader::{LoadError, ProcessorOutputLoader, load_all},
    voting_observer::{CompositeVotingObserver, NoVotingObserver, VotingObserver},
};
pub use use_cases::measure_agreement::{
    AgreementReport, MeasureAgreementError, MeasureAgreementUseCase, PairKappa, Statistic,
};
pub use use_cases::run_voting::{RunVotingError, RunVotingInput, RunVotingUseCase};
