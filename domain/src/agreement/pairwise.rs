//! Pairwise overlap between sources

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Agreement between two named sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseAgreement {
    pub first: String,
    pub second: String,
    pub score: f64,
}

/// Jaccard overlap of the annotation sets of every pair of sources.
///
/// Pairs come out in input order (`(0,1), (0,2), ..., (1,2), ...`). A pair
/// where either side has no annotations scores `0.0`.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::agreement::pairwise_agreement;
///
/// let sources = vec![
///     ("spacy", vec!["0:4:NOUN", "5:10:VERB"]),
///     ("stanza", vec!["0:4:NOUN", "5:10:NOUN"]),
/// ];
/// let pairs = pairwise_agreement(&sources);
/// assert_eq!(pairs.len(), 1);
/// assert!((pairs[0].score - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn pairwise_agreement<N, L>(sources: &[(N, Vec<L>)]) -> Vec<PairwiseAgreement>
where
    N: AsRef<str>,
    L: Eq + Hash,
{
    let sets: Vec<HashSet<&L>> = sources
        .iter()
        .map(|(_, labels)| labels.iter().collect())
        .collect();

    let mut pairs = Vec::new();
    for i in 0..sources.len() {
        for j in (i + 1)..sources.len() {
            let score = jaccard(&sets[i], &sets[j]);
            pairs.push(PairwiseAgreement {
                first: sources[i].0.as_ref().to_string(),
                second: sources[j].0.as_ref().to_string(),
                score,
            });
        }
    }
    pairs
}

fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}
