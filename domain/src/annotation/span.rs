//! Half-open interval arithmetic

use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)`.
///
/// Tokens use character offsets into the shared document; entities use
/// token indices local to the source that produced them.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::Span;
///
/// let a = Span::new(0, 4);
/// let b = Span::new(0, 2);
/// assert_eq!(a.iou(&b), 0.5);
/// assert_eq!(a.iou(&Span::new(4, 8)), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span; zero for empty or inverted spans
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length of the overlap with `other`
    pub fn intersection_len(&self, other: &Span) -> usize {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }

    /// Intersection-over-Union in `[0, 1]`.
    ///
    /// Disjoint spans and spans without any length score `0.0`.
    pub fn iou(&self, other: &Span) -> f64 {
        let intersection = self.intersection_len(other);
        if intersection == 0 {
            return 0.0;
        }
        let union = self.len() + other.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Anything that occupies a [`Span`]
pub trait Spanned {
    fn span(&self) -> Span;
}
