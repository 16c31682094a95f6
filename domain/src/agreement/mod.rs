//! Inter-annotator agreement statistics
//!
//! Post-hoc quality figures, independent of the merge path. They consume
//! either the agreed/disagreed counts of a voting run or raw label
//! sequences supplied by the caller.
//!
//! - [`simple_agreement`] / [`overall_agreement`]: count-based rates
//! - [`fleiss_kappa`]: many raters, fixed category set
//! - [`cohen_kappa`]: exactly two raters
//! - [`krippendorff_alpha`]: nominal, tolerates missing ratings
//! - [`pairwise_agreement`]: Jaccard overlap per source pair

pub mod alpha;
pub mod counts;
pub mod interpretation;
pub mod kappa;
pub mod pairwise;

pub use alpha::krippendorff_alpha;
pub use counts::{AgreementCounts, CategoryCounts, overall_agreement, simple_agreement};
pub use interpretation::AgreementLevel;
pub use kappa::{cohen_kappa, fleiss_kappa};
pub use pairwise::{PairwiseAgreement, pairwise_agreement};
