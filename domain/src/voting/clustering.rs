//! Span clustering
//!
//! Groups same-kind annotations from different sources that plausibly denote
//! the same region, by intersection-over-union of their spans.

use super::candidate::Candidate;
use crate::annotation::Spanned;

/// A non-empty group of candidates for one region
pub type Cluster<'a, T> = Vec<Candidate<'a, T>>;

/// Sorted sweep used for tokens.
///
/// Candidates are stably sorted by start offset. Each unassigned candidate
/// opens a cluster and collects every later unassigned candidate whose IOU
/// with it reaches `threshold` (inclusive). Scanning for a cluster stops at
/// the first candidate starting after the opener's end.
pub fn cluster_sorted_sweep<'a, T: Spanned>(
    candidates: &[Candidate<'a, T>],
    threshold: f64,
) -> Vec<Cluster<'a, T>> {
    let mut sorted: Vec<Candidate<'a, T>> = candidates.to_vec();
    sorted.sort_by_key(|c| c.item.span().start);

    let mut assigned = vec![false; sorted.len()];
    let mut clusters = Vec::new();

    for i in 0..sorted.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let opener = sorted[i].item.span();
        let mut cluster = vec![sorted[i]];

        for j in (i + 1)..sorted.len() {
            if assigned[j] {
                continue;
            }
            let span = sorted[j].item.span();
            if span.start > opener.end {
                break;
            }
            if opener.iou(&span) >= threshold {
                cluster.push(sorted[j]);
                assigned[j] = true;
            }
        }
        clusters.push(cluster);
    }
    clusters
}

/// Greedy bucket assignment used for entities.
///
/// In input order, each candidate joins the first cluster holding any member
/// with IOU at or above `threshold`, or opens a new one.
pub fn cluster_greedy<'a, T: Spanned>(
    candidates: &[Candidate<'a, T>],
    threshold: f64,
) -> Vec<Cluster<'a, T>> {
    let mut clusters: Vec<Cluster<'a, T>> = Vec::new();

    for candidate in candidates {
        let span = candidate.item.span();
        let home = clusters.iter_mut().find(|cluster| {
            cluster
                .iter()
                .any(|member| member.item.span().iou(&span) >= threshold)
        });
        match home {
            Some(cluster) => cluster.push(*candidate),
            None => clusters.push(vec![*candidate]),
        }
    }
    clusters
}
