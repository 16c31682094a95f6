//! Annotation data model
//!
//! Immutable value types exchanged between external analysis tools and the
//! voting engine. All spans are half-open, all confidences lie in `[0, 1]`.

pub mod dependency;
pub mod entity;
pub mod processor_output;
pub mod span;
pub mod token;

pub use dependency::Dependency;
pub use entity::Entity;
pub use processor_output::ProcessorOutput;
pub use span::{Span, Spanned};
pub use token::Token;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Behaviour shared by every votable annotation kind
pub trait Annotation: Clone {
    fn confidence(&self) -> f64;

    fn sources(&self) -> &BTreeSet<String>;

    /// Copy of this annotation carrying `sources` instead of its own
    fn with_sources(&self, sources: BTreeSet<String>) -> Self;
}

/// The three independently voted annotation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationCategory {
    Token,
    Dependency,
    Entity,
}

impl AnnotationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationCategory::Token => "token",
            AnnotationCategory::Dependency => "dependency",
            AnnotationCategory::Entity => "entity",
        }
    }

    /// All categories, in pipeline order
    pub fn all() -> [AnnotationCategory; 3] {
        [
            AnnotationCategory::Token,
            AnnotationCategory::Dependency,
            AnnotationCategory::Entity,
        ]
    }
}

impl std::fmt::Display for AnnotationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub(crate) fn default_confidence() -> f64 {
    1.0
}
