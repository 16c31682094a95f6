//! Stable ingestion of annotations from many sources

use crate::annotation::{Annotation, ProcessorOutput};
use std::collections::BTreeSet;

/// One annotation proposed by one source, tagged with its position in the
/// supplied input.
///
/// `ordinal` counts every annotation of a category across all outputs:
/// first output first, then in each output's own order. Every tie-break in
/// the engine prefers the lowest ordinal, so results never depend on
/// traversal order of intermediate collections.
#[derive(Debug)]
pub struct Candidate<'a, T> {
    pub ordinal: usize,
    /// Position of the producing output in the supplied batch
    pub output: usize,
    /// Position of the item within its output's collection
    pub position: usize,
    /// `source_name` of the producing [`ProcessorOutput`]
    pub source: &'a str,
    pub item: &'a T,
}

impl<T> Clone for Candidate<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Candidate<'_, T> {}

impl<'a, T: Annotation> Candidate<'a, T> {
    /// The item's own sources, or the producing source when it lists none
    pub fn effective_sources(&self) -> BTreeSet<String> {
        if self.item.sources().is_empty() {
            BTreeSet::from([self.source.to_string()])
        } else {
            self.item.sources().clone()
        }
    }

    /// Owned copy of the item carrying its effective sources
    pub fn attributed(&self) -> T {
        self.item.with_sources(self.effective_sources())
    }
}

/// Flatten one category of every output into candidates, in input order
pub fn collect_candidates<'a, T, F>(
    outputs: &'a [ProcessorOutput],
    project: F,
) -> Vec<Candidate<'a, T>>
where
    F: Fn(&'a ProcessorOutput) -> &'a [T],
{
    outputs
        .iter()
        .enumerate()
        .flat_map(|(output_index, output)| {
            let source = output.source_name.as_str();
            project(output)
                .iter()
                .enumerate()
                .map(move |(position, item)| (output_index, position, source, item))
        })
        .enumerate()
        .map(|(ordinal, (output, position, source, item))| Candidate {
            ordinal,
            output,
            position,
            source,
            item,
        })
        .collect()
}

/// Member with the lowest ordinal
pub fn earliest<'a, 'c, T>(members: &'c [Candidate<'a, T>]) -> Option<&'c Candidate<'a, T>> {
    members.iter().min_by_key(|c| c.ordinal)
}

/// Union of the members' effective sources
pub fn union_sources<T: Annotation>(members: &[Candidate<'_, T>]) -> BTreeSet<String> {
    members
        .iter()
        .flat_map(|c| c.effective_sources())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Token;

    fn outputs() -> Vec<ProcessorOutput> {
        vec![
            ProcessorOutput::new("spacy", "3.7").with_tokens(vec![
                Token::new(0, "IL-6", 0, 4),
                Token::new(1, "binds", 5, 10),
            ]),
            ProcessorOutput::new("stanza", "1.8")
                .with_tokens(vec![Token::new(0, "IL-6", 0, 4).with_source("stanza-bio")]),
        ]
    }

    #[test]
    fn test_ordinals_follow_input_order() {
        let outputs = outputs();
        let candidates = collect_candidates(&outputs, |o| o.tokens.as_slice());
        let seen: Vec<(usize, usize, usize, &str)> = candidates
            .iter()
            .map(|c| (c.ordinal, c.output, c.position, c.source))
            .collect();
        assert_eq!(
            seen,
            vec![(0, 0, 0, "spacy"), (1, 0, 1, "spacy"), (2, 1, 0, "stanza")]
        );
    }

    #[test]
    fn test_effective_sources() {
        let outputs = outputs();
        let candidates = collect_candidates(&outputs, |o| o.tokens.as_slice());
        assert_eq!(
            candidates[0].effective_sources(),
            BTreeSet::from(["spacy".to_string()])
        );
        // explicit sources win over the producing output's name
        assert_eq!(
            candidates[2].effective_sources(),
            BTreeSet::from(["stanza-bio".to_string()])
        );
        assert!(candidates[0].attributed().sources.contains("spacy"));
        assert!(outputs[0].tokens[0].sources.is_empty());
    }

    #[test]
    fn test_earliest_and_union() {
        let outputs = outputs();
        let candidates = collect_candidates(&outputs, |o| o.tokens.as_slice());
        let members = vec![candidates[2], candidates[0]];
        assert_eq!(earliest(&members).map(|c| c.ordinal), Some(0));
        let sources = union_sources(&members);
        assert_eq!(sources.len(), 2);
        assert!(sources.contains("spacy"));
        assert!(sources.contains("stanza-bio"));
    }

    #[test]
    fn test_empty_input() {
        let outputs: Vec<ProcessorOutput> = vec![];
        assert!(collect_candidates(&outputs, |o| o.entities.as_slice()).is_empty());
    }
}
