//! Measure Agreement use case
//!
//! Aligns the tokens of several processor outputs by character span and
//! reports inter-annotator agreement on their part-of-speech tags.

use nlp_quorum_domain::agreement::{
    AgreementLevel, PairwiseAgreement, cohen_kappa, fleiss_kappa, krippendorff_alpha,
    pairwise_agreement,
};
use nlp_quorum_domain::{DomainError, ProcessorOutput};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while measuring agreement
#[derive(Error, Debug)]
pub enum MeasureAgreementError {
    #[error("At least two processor outputs are required (got {0})")]
    NotEnoughSources(usize),

    #[error("Statistic failed: {0}")]
    Statistic(#[from] DomainError),
}

/// One agreement figure with its interpretation band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub value: f64,
    pub level: AgreementLevel,
}

impl Statistic {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            level: AgreementLevel::from_score(value),
        }
    }
}

/// Cohen's kappa for one pair of sources over the spans both labelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairKappa {
    pub first: String,
    pub second: String,
    /// Spans labelled by both sources
    pub shared_items: usize,
    pub kappa: Statistic,
}

/// Agreement figures for one batch of processor outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementReport {
    /// Rater names, in input order
    pub sources: Vec<String>,
    /// Distinct token spans across all sources
    pub items: usize,
    /// Spans labelled by every source
    pub complete_items: usize,
    /// Over the complete spans; absent when there are none
    pub fleiss_kappa: Option<Statistic>,
    /// Over all spans, missing labels ignored
    pub krippendorff_alpha: Statistic,
    pub cohen_kappa: Vec<PairKappa>,
    /// Jaccard overlap of `(span, tag)` sets
    pub pairwise: Vec<PairwiseAgreement>,
}

/// Use case for reporting inter-annotator agreement on token tags
#[derive(Debug, Default)]
pub struct MeasureAgreementUseCase;

impl MeasureAgreementUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        outputs: &[ProcessorOutput],
    ) -> Result<AgreementReport, MeasureAgreementError> {
        if outputs.len() < 2 {
            return Err(MeasureAgreementError::NotEnoughSources(outputs.len()));
        }
        let sources: Vec<String> = outputs.iter().map(|o| o.source_name.clone()).collect();
        info!("Measuring tag agreement across {} sources", sources.len());

        let matrix = label_matrix(outputs);
        let categories: Vec<&str> = matrix
            .iter()
            .flatten()
            .filter(|label| !label.is_empty())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        debug!(
            "{} aligned spans, {} distinct tags",
            matrix.len(),
            categories.len()
        );

        let complete: Vec<Vec<String>> = matrix
            .iter()
            .filter(|row| row.iter().all(|label| !label.is_empty()))
            .cloned()
            .collect();
        let fleiss = if complete.is_empty() {
            None
        } else {
            Some(Statistic::new(fleiss_kappa(&complete, &categories)?))
        };

        let mut cohen = Vec::new();
        for i in 0..outputs.len() {
            for j in (i + 1)..outputs.len() {
                let (first, second): (Vec<&str>, Vec<&str>) = matrix
                    .iter()
                    .filter(|row| !row[i].is_empty() && !row[j].is_empty())
                    .map(|row| (row[i].as_str(), row[j].as_str()))
                    .unzip();
                cohen.push(PairKappa {
                    first: sources[i].clone(),
                    second: sources[j].clone(),
                    shared_items: first.len(),
                    kappa: Statistic::new(cohen_kappa(&first, &second, &categories)?),
                });
            }
        }

        let tagged: Vec<(&str, Vec<(usize, usize, &str)>)> = outputs
            .iter()
            .map(|o| {
                let labels = o
                    .tokens
                    .iter()
                    .map(|t| (t.start_char, t.end_char, t.pos.as_str()))
                    .collect();
                (o.source_name.as_str(), labels)
            })
            .collect();

        Ok(AgreementReport {
            items: matrix.len(),
            complete_items: complete.len(),
            fleiss_kappa: fleiss,
            krippendorff_alpha: Statistic::new(krippendorff_alpha(&matrix)),
            cohen_kappa: cohen,
            pairwise: pairwise_agreement(&tagged),
            sources,
        })
    }
}

/// One row per distinct character span, one column per output.
///
/// A missing label is the empty string; when an output has several tokens
/// on one span the first one counts.
fn label_matrix(outputs: &[ProcessorOutput]) -> Vec<Vec<String>> {
    let mut rows: BTreeMap<(usize, usize), Vec<String>> = BTreeMap::new();
    for (column, output) in outputs.iter().enumerate() {
        for token in &output.tokens {
            let row = rows
                .entry((token.start_char, token.end_char))
                .or_insert_with(|| vec![String::new(); outputs.len()]);
            if row[column].is_empty() {
                row[column] = token.pos.clone();
            }
        }
    }
    rows.into_values().collect()
}
