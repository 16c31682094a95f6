//! Voting engine: clustering, resolution and merge per category

use super::candidate::{Candidate, collect_candidates};
use super::clustering::{Cluster, cluster_greedy, cluster_sorted_sweep};
use super::config::VotingConfig;
use super::grouping::group_by_key;
use super::merger::Merger;
use super::resolver::AgreementResolver;
use super::result::{CategoryVote, SkipReason, SkippedAnnotation, VotingResult};
use crate::agreement::overall_agreement;
use crate::annotation::{
    Annotation, AnnotationCategory, Dependency, Entity, ProcessorOutput, Spanned, Token,
};
use crate::core::error::DomainError;
use std::collections::HashSet;

/// Reconciles a batch of processor outputs into one annotation set.
///
/// The engine holds only its validated configuration, so one instance can
/// serve concurrent runs. The three `vote_*` methods read disjoint parts of
/// the input and may run in parallel; [`VotingEngine::assemble`] joins them.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::{ProcessorOutput, Token, VotingConfig, VotingEngine};
///
/// let engine = VotingEngine::new(VotingConfig::default()).unwrap();
/// let outputs = vec![
///     ProcessorOutput::new("spacy", "3.7")
///         .with_tokens(vec![Token::new(0, "Cells", 0, 5).with_pos("NOUN")]),
///     ProcessorOutput::new("stanza", "1.8")
///         .with_tokens(vec![Token::new(0, "Cells", 0, 5).with_pos("NOUN")]),
/// ];
///
/// let result = engine.vote_all(&outputs);
/// assert_eq!(result.agreed_tokens.len(), 1);
/// assert_eq!(result.agreed_tokens[0].sources.len(), 2);
/// assert_eq!(result.agreement_score, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct VotingEngine {
    config: VotingConfig,
    resolver: AgreementResolver,
    merger: Merger,
}

impl VotingEngine {
    /// Validate `config` and build an engine; fails before any processing
    pub fn new(config: VotingConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            resolver: AgreementResolver::new(&config),
            merger: Merger::new(config.min_agreement, config.confidence_strategy.clone()),
            config,
        })
    }

    pub fn config(&self) -> &VotingConfig {
        &self.config
    }

    pub fn vote_tokens(&self, outputs: &[ProcessorOutput]) -> CategoryVote<Token> {
        let candidates = collect_candidates(outputs, |o| o.tokens.as_slice());
        let (valid, skipped) = partition(candidates, AnnotationCategory::Token, |c| {
            empty_span(c).or_else(|| invalid_confidence(c))
        });
        let clusters = cluster_sorted_sweep(&valid, self.config.iou_threshold);

        decide(
            clusters,
            skipped,
            |cluster| self.resolver.resolve_tokens(cluster),
            |group| self.merger.merge_tokens(group),
        )
    }

    /// Dependencies are grouped by `(head, dependent)` after dropping those
    /// whose indices do not resolve within their own output.
    ///
    /// In every category an input whose confidence lies outside `[0, 1]` is
    /// skipped and recorded.
    pub fn vote_dependencies(&self, outputs: &[ProcessorOutput]) -> CategoryVote<Dependency> {
        let indices: Vec<HashSet<usize>> =
            outputs.iter().map(ProcessorOutput::token_indices).collect();
        let candidates = collect_candidates(outputs, |o| o.dependencies.as_slice());

        let (valid, skipped) = partition(candidates, AnnotationCategory::Dependency, |c| {
            let known = &indices[c.output];
            if !known.contains(&c.item.head) {
                Some(SkipReason::MissingHead { head: c.item.head })
            } else if !known.contains(&c.item.dependent) {
                Some(SkipReason::MissingDependent {
                    dependent: c.item.dependent,
                })
            } else {
                invalid_confidence(c)
            }
        });

        let groups: Vec<Cluster<'_, Dependency>> =
            group_by_key(&valid, |c| (c.item.head, c.item.dependent))
                .into_iter()
                .map(|bucket| bucket.members)
                .collect();

        decide(
            groups,
            skipped,
            |group| self.resolver.resolve_dependencies(group),
            |group| match self.resolver.authoritative_member(group) {
                Some(member) => Some(self.merger.keep_authoritative(&member)),
                None => self.merger.merge_dependencies(group),
            },
        )
    }

    pub fn vote_entities(&self, outputs: &[ProcessorOutput]) -> CategoryVote<Entity> {
        let candidates = collect_candidates(outputs, |o| o.entities.as_slice());
        let (valid, skipped) = partition(candidates, AnnotationCategory::Entity, |c| {
            empty_span(c).or_else(|| invalid_confidence(c))
        });
        let clusters = cluster_greedy(&valid, self.config.iou_threshold);

        decide(
            clusters,
            skipped,
            |cluster| self.resolver.resolve_entities(cluster),
            |group| self.merger.merge_entities(group),
        )
    }

    /// Run all three categories in sequence
    pub fn vote_all(&self, outputs: &[ProcessorOutput]) -> VotingResult {
        Self::assemble(
            outputs,
            self.vote_tokens(outputs),
            self.vote_dependencies(outputs),
            self.vote_entities(outputs),
        )
    }

    /// Combine per-category votes into the final result
    pub fn assemble(
        outputs: &[ProcessorOutput],
        tokens: CategoryVote<Token>,
        dependencies: CategoryVote<Dependency>,
        entities: CategoryVote<Entity>,
    ) -> VotingResult {
        let mut skipped = tokens.skipped;
        skipped.extend(dependencies.skipped);
        skipped.extend(entities.skipped);

        let mut result = VotingResult {
            agreed_tokens: tokens.agreed,
            agreed_dependencies: dependencies.agreed,
            agreed_entities: entities.agreed,
            disagreed_tokens: tokens.disagreed,
            disagreed_dependencies: dependencies.disagreed,
            disagreed_entities: entities.disagreed,
            participating_sources: outputs.iter().map(|o| o.source_name.clone()).collect(),
            skipped,
            ..Default::default()
        };

        let counts = result.category_counts();
        result.num_agreements = counts.agreed();
        result.num_disagreements = counts.disagreed();
        result.agreement_score = overall_agreement(&counts);
        result
    }
}

/// Accept and merge each cluster, or keep it as a disagreed group
fn decide<'a, T, R, M>(
    clusters: Vec<Cluster<'a, T>>,
    skipped: Vec<SkippedAnnotation>,
    resolve: R,
    merge: M,
) -> CategoryVote<T>
where
    T: Annotation,
    R: Fn(&[Candidate<'a, T>]) -> Option<Vec<Candidate<'a, T>>>,
    M: Fn(&[Candidate<'a, T>]) -> Option<T>,
{
    let mut vote = CategoryVote {
        skipped,
        ..Default::default()
    };
    for cluster in clusters {
        match resolve(&cluster).and_then(|accepted| merge(&accepted)) {
            Some(merged) => vote.agreed.push(merged),
            None => vote
                .disagreed
                .push(cluster.iter().map(Candidate::attributed).collect()),
        }
    }
    vote
}

/// Split candidates into those to vote on and those skipped for `reason`
fn partition<'a, T, F>(
    candidates: Vec<Candidate<'a, T>>,
    category: AnnotationCategory,
    reason: F,
) -> (Vec<Candidate<'a, T>>, Vec<SkippedAnnotation>)
where
    F: Fn(&Candidate<'a, T>) -> Option<SkipReason>,
{
    let mut valid = Vec::with_capacity(candidates.len());
    let mut skipped = Vec::new();
    for candidate in candidates {
        match reason(&candidate) {
            Some(reason) => skipped.push(skip(&candidate, category, reason)),
            None => valid.push(candidate),
        }
    }
    (valid, skipped)
}

fn empty_span<T: Spanned>(candidate: &Candidate<'_, T>) -> Option<SkipReason> {
    let span = candidate.item.span();
    (span.start >= span.end).then_some(SkipReason::EmptySpan {
        start: span.start,
        end: span.end,
    })
}

fn invalid_confidence<T: Annotation>(candidate: &Candidate<'_, T>) -> Option<SkipReason> {
    let confidence = candidate.item.confidence();
    (!(0.0..=1.0).contains(&confidence)).then_some(SkipReason::InvalidConfidence { confidence })
}

fn skip<T>(
    candidate: &Candidate<'_, T>,
    category: AnnotationCategory,
    reason: SkipReason,
) -> SkippedAnnotation {
    SkippedAnnotation {
        source: candidate.source.to_string(),
        category,
        position: candidate.position,
        reason,
    }
}
