//! Quorum-based acceptance of clusters and groups

use super::candidate::Candidate;
use super::config::{MatchingMode, VotingConfig};
use super::grouping::{group_by_key, largest};
use crate::annotation::{Annotation, Dependency, Entity, Token};
use std::hash::Hash;

/// Decides, per cluster or key group, which members enough sources agree on.
///
/// Every `resolve_*` method returns the accepted sub-group, or `None` when
/// the group is disagreed.
#[derive(Debug, Clone)]
pub struct AgreementResolver {
    min_agreement: usize,
    matching_mode: MatchingMode,
    authoritative_source: Option<String>,
}

/// Matching key of a token inside a span cluster
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TokenKey<'a> {
    Pos(&'a str),
    PosLemma(&'a str, String),
}

impl AgreementResolver {
    pub fn new(config: &VotingConfig) -> Self {
        Self {
            min_agreement: config.min_agreement,
            matching_mode: config.token_matching_mode,
            authoritative_source: config.authoritative_source.clone(),
        }
    }

    pub fn min_agreement(&self) -> usize {
        self.min_agreement
    }

    pub fn resolve_tokens<'a>(
        &self,
        cluster: &[Candidate<'a, Token>],
    ) -> Option<Vec<Candidate<'a, Token>>> {
        let mode = self.matching_mode;
        self.resolve_by(cluster, |c| match mode {
            MatchingMode::Flexible => TokenKey::Pos(c.item.pos.as_str()),
            MatchingMode::Strict => {
                TokenKey::PosLemma(c.item.pos.as_str(), c.item.lemma.to_lowercase())
            }
        })
    }

    /// Resolve dependencies sharing one `(head, dependent)` pair.
    ///
    /// A member attributed to the authoritative source is accepted alone,
    /// bypassing the quorum. Otherwise members vote by base relation label.
    pub fn resolve_dependencies<'a>(
        &self,
        group: &[Candidate<'a, Dependency>],
    ) -> Option<Vec<Candidate<'a, Dependency>>> {
        if let Some(authoritative) = self.authoritative_member(group) {
            return Some(vec![authoritative]);
        }
        self.resolve_by(group, |c| c.item.base_relation())
    }

    pub fn resolve_entities<'a>(
        &self,
        cluster: &[Candidate<'a, Entity>],
    ) -> Option<Vec<Candidate<'a, Entity>>> {
        self.resolve_by(cluster, |c| c.item.entity_type.as_str())
    }

    /// Earliest member whose effective sources include the authoritative source
    pub fn authoritative_member<'a, T: Annotation>(
        &self,
        group: &[Candidate<'a, T>],
    ) -> Option<Candidate<'a, T>> {
        let authoritative = self.authoritative_source.as_deref()?;
        group
            .iter()
            .filter(|c| c.effective_sources().contains(authoritative))
            .min_by_key(|c| c.ordinal)
            .copied()
    }

    fn resolve_by<'a, T, K, F>(
        &self,
        group: &[Candidate<'a, T>],
        key: F,
    ) -> Option<Vec<Candidate<'a, T>>>
    where
        K: Eq + Hash + Clone,
        F: Fn(&Candidate<'a, T>) -> K,
    {
        if group.len() < self.min_agreement {
            return None;
        }
        largest(group_by_key(group, key))
            .filter(|bucket| bucket.len() >= self.min_agreement)
            .map(|bucket| bucket.members)
    }
}
