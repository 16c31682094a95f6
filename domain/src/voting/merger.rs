//! Builds one canonical annotation from an accepted group

use super::candidate::{Candidate, earliest, union_sources};
use super::grouping::{group_by_key, largest, majority};
use crate::annotation::{Annotation, Dependency, Entity, Token};
use crate::confidence::ConfidenceStrategy;
use std::collections::{BTreeMap, BTreeSet};

/// Merges accepted groups into new annotations.
///
/// Members are processed in input order, so positional strategy weights
/// line up with the order the sources were supplied in. Every `merge_*`
/// method returns `None` for an empty group.
#[derive(Debug, Clone)]
pub struct Merger {
    min_agreement: usize,
    strategy: ConfidenceStrategy,
}

impl Merger {
    pub fn new(min_agreement: usize, strategy: ConfidenceStrategy) -> Self {
        Self {
            min_agreement,
            strategy,
        }
    }

    /// Identity from the earliest member, tags by majority, morphology by quorum
    pub fn merge_tokens(&self, group: &[Candidate<'_, Token>]) -> Option<Token> {
        let group = in_input_order(group);
        let base = earliest(&group)?.item;
        let pos = majority(&group, |c| c.item.pos.clone())?;
        let lemma = majority(&group, |c| c.item.lemma.to_lowercase())?;

        Some(Token {
            pos,
            lemma,
            morph: self.merge_morph(&group),
            confidence: self.confidence(&group),
            sources: union_sources(&group),
            ..base.clone()
        })
    }

    pub fn merge_dependencies(&self, group: &[Candidate<'_, Dependency>]) -> Option<Dependency> {
        let group = in_input_order(group);
        let base = earliest(&group)?.item;
        let relation = majority(&group, |c| c.item.relation.clone())?;

        Some(Dependency {
            head: base.head,
            dependent: base.dependent,
            relation,
            confidence: self.confidence(&group),
            sources: union_sources(&group),
        })
    }

    /// Keep an authoritative dependency as given, with its confidence clamped
    pub fn keep_authoritative(&self, member: &Candidate<'_, Dependency>) -> Dependency {
        let mut dependency = member.attributed();
        dependency.confidence = dependency.confidence.clamp(0.0, 1.0);
        dependency
    }

    /// Type by majority, span as the rounded mean of member boundaries.
    ///
    /// Member tokens and domain flags come from the representative: the
    /// earliest member whose start index is shared by the most peers.
    pub fn merge_entities(&self, group: &[Candidate<'_, Entity>]) -> Option<Entity> {
        let group = in_input_order(group);
        let entity_type = majority(&group, |c| c.item.entity_type.clone())?;
        let representative = largest(group_by_key(&group, |c| c.item.start))
            .and_then(|bucket| earliest(&bucket.members).map(|c| c.item))?;

        let n = group.len() as f64;
        let start = (group.iter().map(|c| c.item.start as f64).sum::<f64>() / n).round() as usize;
        let end = (group.iter().map(|c| c.item.end as f64).sum::<f64>() / n).round() as usize;

        Some(Entity {
            entity_type,
            start,
            end,
            tokens: representative.tokens.clone(),
            confidence: self.confidence(&group),
            sources: union_sources(&group),
            is_scientific: representative.is_scientific,
            domain: representative.domain.clone(),
        })
    }

    fn confidence<T: Annotation>(&self, group: &[Candidate<'_, T>]) -> f64 {
        let confidences: Vec<f64> = group.iter().map(|c| c.item.confidence()).collect();
        self.strategy.aggregate(&confidences).clamp(0.0, 1.0)
    }

    /// Keep a feature value only when at least `min_agreement` members share it
    fn merge_morph(&self, group: &[Candidate<'_, Token>]) -> BTreeMap<String, String> {
        let features: BTreeSet<&str> = group
            .iter()
            .flat_map(|c| c.item.morph.keys().map(String::as_str))
            .collect();

        let mut morph = BTreeMap::new();
        for feature in features {
            let carriers: Vec<Candidate<'_, Token>> = group
                .iter()
                .filter(|c| c.item.morph.contains_key(feature))
                .copied()
                .collect();
            let winner = largest(group_by_key(&carriers, |c| {
                c.item.morph.get(feature).cloned().unwrap_or_default()
            }));
            if let Some(bucket) = winner.filter(|b| b.len() >= self.min_agreement) {
                morph.insert(feature.to_string(), bucket.key);
            }
        }
        morph
    }
}

fn in_input_order<'a, T>(group: &[Candidate<'a, T>]) -> Vec<Candidate<'a, T>> {
    let mut ordered = group.to_vec();
    ordered.sort_by_key(|c| c.ordinal);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::ProcessorOutput;
    use crate::voting::candidate::collect_candidates;

    fn merger() -> Merger {
        Merger::new(2, ConfidenceStrategy::Mean)
    }

    #[test]
    fn test_merge_tokens() {
        let outputs = vec![
            ProcessorOutput::new("spacy", "3").with_tokens(vec![
                Token::new(4, "Cells", 10, 15)
                    .with_lemma("Cell")
                    .with_pos("NOUN")
                    .with_pos_fine("NNS")
                    .with_morph("Number", "Plur")
                    .with_confidence(0.8),
            ]),
            ProcessorOutput::new("stanza", "1").with_tokens(vec![
                Token::new(3, "Cells", 10, 15)
                    .with_lemma("cell")
                    .with_pos("NOUN")
                    .with_morph("Number", "Plur")
                    .with_morph("Case", "Nom")
                    .with_confidence(0.6),
            ]),
        ];
        let group = collect_candidates(&outputs, |o| o.tokens.as_slice());
        let merged = merger().merge_tokens(&group).unwrap();

        assert_eq!(merged.index, 4);
        assert_eq!(merged.pos, "NOUN");
        assert_eq!(merged.pos_fine.as_deref(), Some("NNS"));
        assert_eq!(merged.lemma, "cell");
        assert_eq!(merged.morph.get("Number").map(String::as_str), Some("Plur"));
        // one carrier only
        assert!(!merged.morph.contains_key("Case"));
        assert!((merged.confidence - 0.7).abs() < 1e-12);
        assert_eq!(merged.sources.len(), 2);
    }

    #[test]
    fn test_merge_tokens_majority_tie_takes_earliest() {
        let outputs = vec![
            ProcessorOutput::new("a", "1")
                .with_tokens(vec![Token::new(0, "run", 0, 3).with_pos("VERB")]),
            ProcessorOutput::new("b", "1")
                .with_tokens(vec![Token::new(0, "run", 0, 3).with_pos("NOUN")]),
        ];
        let mut group = collect_candidates(&outputs, |o| o.tokens.as_slice());
        group.reverse();
        let merged = merger().merge_tokens(&group).unwrap();
        assert_eq!(merged.pos, "VERB");
        assert!(merged.sources.contains("a"));
    }

    #[test]
    fn test_merge_dependencies() {
        let outputs = vec![
            ProcessorOutput::new("a", "1")
                .with_dependencies(vec![Dependency::new(1, 0, "nmod:poss").with_confidence(0.9)]),
            ProcessorOutput::new("b", "1")
                .with_dependencies(vec![Dependency::new(1, 0, "nmod").with_confidence(0.7)]),
            ProcessorOutput::new("c", "1")
                .with_dependencies(vec![Dependency::new(1, 0, "nmod").with_confidence(0.5)]),
        ];
        let group = collect_candidates(&outputs, |o| o.dependencies.as_slice());
        let merged = merger().merge_dependencies(&group).unwrap();
        assert_eq!((merged.head, merged.dependent), (1, 0));
        assert_eq!(merged.relation, "nmod");
        assert!((merged.confidence - 0.7).abs() < 1e-12);
        assert_eq!(merged.sources.len(), 3);
    }

    #[test]
    fn test_keep_authoritative_skips_strategy() {
        let outputs = vec![
            ProcessorOutput::new("stanza", "1")
                .with_dependencies(vec![Dependency::new(1, 0, "obj").with_confidence(0.8)]),
        ];
        let group = collect_candidates(&outputs, |o| o.dependencies.as_slice());
        let merger = Merger::new(2, ConfidenceStrategy::WeightedMean(vec![0.0]));
        let kept = merger.keep_authoritative(&group[0]);
        assert_eq!(kept.relation, "obj");
        assert_eq!(kept.confidence, 0.8);
        assert!(kept.sources.contains("stanza"));
    }

    #[test]
    fn test_merge_entities_rounded_mean_span() {
        let outputs = vec![
            ProcessorOutput::new("a", "1").with_entities(vec![Entity::new("DISEASE", 0, 20)]),
            ProcessorOutput::new("b", "1").with_entities(vec![Entity::new("DISEASE", 0, 18)]),
        ];
        let group = collect_candidates(&outputs, |o| o.entities.as_slice());
        let merged = merger().merge_entities(&group).unwrap();
        assert_eq!(merged.entity_type, "DISEASE");
        assert_eq!((merged.start, merged.end), (0, 19));
    }

    #[test]
    fn test_merge_entities_representative_shares_start() {
        let outputs = vec![
            ProcessorOutput::new("a", "1").with_entities(vec![Entity::new("GENE", 1, 3)]),
            ProcessorOutput::new("b", "1").with_entities(vec![
                Entity::new("GENE", 0, 3)
                    .with_tokens(vec![Token::new(0, "p", 0, 1)])
                    .with_domain("biology"),
            ]),
            ProcessorOutput::new("c", "1").with_entities(vec![Entity::new("GENE", 0, 3)]),
        ];
        let group = collect_candidates(&outputs, |o| o.entities.as_slice());
        let merged = merger().merge_entities(&group).unwrap();
        // mean start 1/3 rounds to 0
        assert_eq!((merged.start, merged.end), (0, 3));
        assert_eq!(merged.tokens.len(), 1);
        assert!(merged.is_scientific);
        assert_eq!(merged.domain.as_deref(), Some("biology"));
    }

    #[test]
    fn test_strategy_applies_in_input_order() {
        let outputs = vec![
            ProcessorOutput::new("a", "1")
                .with_tokens(vec![Token::new(0, "x", 0, 1).with_confidence(1.0)]),
            ProcessorOutput::new("b", "1")
                .with_tokens(vec![Token::new(0, "x", 0, 1).with_confidence(0.0)]),
        ];
        let mut group = collect_candidates(&outputs, |o| o.tokens.as_slice());
        group.reverse();
        let merger = Merger::new(2, ConfidenceStrategy::WeightedMean(vec![3.0, 1.0]));
        let merged = merger.merge_tokens(&group).unwrap();
        assert!((merged.confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_group() {
        let empty: Vec<Candidate<'_, Entity>> = Vec::new();
        assert!(merger().merge_entities(&empty).is_none());
    }
}
