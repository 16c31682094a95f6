//! Console output formatter for voting results

use colored::Colorize;
use nlp_quorum_application::{AgreementReport, Statistic};
use nlp_quorum_domain::{AgreementCounts, Entity, SkippedAnnotation, VotingResult};
use std::collections::BTreeSet;

/// Formats voting results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the summary of one voting run
    pub fn format(result: &VotingResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("NLP Quorum Voting Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Sources:".cyan().bold(),
            Self::join(&result.participating_sources)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Agreement score:".cyan().bold(),
            Self::score(result.agreement_score)
        ));
        output.push_str(&format!(
            "{} {} agreed, {} disagreed\n",
            "Annotations:".cyan().bold(),
            result.num_agreements,
            result.num_disagreements
        ));

        output.push_str(&Self::section_header("Per Category"));
        let counts = result.category_counts();
        output.push_str(&Self::category_line("Tokens", counts.tokens));
        output.push_str(&Self::category_line("Dependencies", counts.dependencies));
        output.push_str(&Self::category_line("Entities", counts.entities));

        if !result.agreed_entities.is_empty() {
            output.push_str(&Self::section_header("Agreed Entities"));
            for entity in &result.agreed_entities {
                output.push_str(&Self::entity_line(entity));
            }
        }

        if !result.skipped.is_empty() {
            output.push_str(&Self::section_header("Skipped Annotations"));
            for skipped in &result.skipped {
                output.push_str(&Self::skipped_line(skipped));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format an agreement report
    pub fn format_report(report: &AgreementReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Tag Agreement"));
        output.push_str(&format!(
            "{} {} aligned spans, {} labelled by every source\n\n",
            "Items:".cyan().bold(),
            report.items,
            report.complete_items
        ));

        match &report.fleiss_kappa {
            Some(kappa) => output.push_str(&Self::statistic_line("Fleiss' kappa", kappa)),
            None => output.push_str(&format!(
                "  {:<22} {}\n",
                "Fleiss' kappa",
                "n/a (no span labelled by all sources)".dimmed()
            )),
        }
        output.push_str(&Self::statistic_line(
            "Krippendorff's alpha",
            &report.krippendorff_alpha,
        ));

        if !report.cohen_kappa.is_empty() {
            output.push_str(&format!("\n{}\n", "Cohen's kappa:".cyan().bold()));
            for pair in &report.cohen_kappa {
                let label = format!("{} / {}", pair.first, pair.second);
                output.push_str(&format!(
                    "  {:<30} {:>7.3}  {} ({} shared)\n",
                    label,
                    pair.kappa.value,
                    Self::level(&pair.kappa),
                    pair.shared_items
                ));
            }
        }

        if !report.pairwise.is_empty() {
            output.push_str(&format!("\n{}\n", "Pairwise overlap:".cyan().bold()));
            for pair in &report.pairwise {
                let label = format!("{} / {}", pair.first, pair.second);
                output.push_str(&format!("  {:<30} {:>7.3}\n", label, pair.score));
            }
        }

        output
    }

    /// Format as JSON; with a report the two are wrapped in one object
    pub fn format_json(result: &VotingResult, report: Option<&AgreementReport>) -> String {
        let rendered = match report {
            Some(report) => serde_json::to_string_pretty(&serde_json::json!({
                "result": result,
                "agreement": report,
            })),
            None => serde_json::to_string_pretty(result),
        };
        rendered.unwrap_or_else(|_| "{}".to_string())
    }

    fn category_line(name: &str, counts: AgreementCounts) -> String {
        if counts.total() == 0 {
            return format!("  {:<14} {}\n", name, "no data".dimmed());
        }
        format!(
            "  {:<14} {:>5} agreed  {:>5} disagreed  {}\n",
            name,
            counts.agreed,
            counts.disagreed,
            Self::score(counts.rate())
        )
    }

    fn entity_line(entity: &Entity) -> String {
        let text = entity.text();
        let text = if text.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", text)
        };
        format!(
            "  {} [{}, {}){}  {:.2}  {}\n",
            entity.entity_type.yellow().bold(),
            entity.start,
            entity.end,
            text,
            entity.confidence,
            Self::join(&entity.sources).dimmed()
        )
    }

    fn skipped_line(skipped: &SkippedAnnotation) -> String {
        format!(
            "  {} {} {} #{}: {}\n",
            "!".yellow(),
            skipped.source,
            skipped.category,
            skipped.position,
            skipped.reason
        )
    }

    fn statistic_line(name: &str, statistic: &Statistic) -> String {
        format!(
            "  {:<22} {:>7.3}  {}\n",
            name,
            statistic.value,
            Self::level(statistic)
        )
    }

    fn level(statistic: &Statistic) -> String {
        let label = statistic.level.as_str();
        if statistic.value >= 0.6 {
            label.green().to_string()
        } else if statistic.value >= 0.2 {
            label.yellow().to_string()
        } else {
            label.red().to_string()
        }
    }

    fn score(rate: f64) -> String {
        let text = format!("{:.1}%", rate * 100.0);
        if rate >= 0.8 {
            text.green().to_string()
        } else if rate >= 0.5 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        }
    }

    fn join(sources: &BTreeSet<String>) -> String {
        sources.iter().cloned().collect::<Vec<_>>().join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nlp_quorum_domain::{AnnotationCategory, SkipReason, Token};

    fn sample_result() -> VotingResult {
        VotingResult {
            agreed_tokens: vec![Token::new(0, "Aspirin", 0, 7)],
            disagreed_tokens: vec![vec![Token::new(1, "eases", 8, 13)]],
            agreed_entities: vec![
                Entity::new("CHEMICAL", 0, 7)
                    .with_tokens(vec![Token::new(0, "Aspirin", 0, 7)])
                    .with_source("spacy")
                    .with_source("stanza"),
            ],
            agreement_score: 0.6,
            num_agreements: 2,
            num_disagreements: 1,
            participating_sources: ["spacy", "stanza"].iter().map(|s| s.to_string()).collect(),
            skipped: vec![SkippedAnnotation {
                source: "nltk".to_string(),
                category: AnnotationCategory::Dependency,
                position: 4,
                reason: SkipReason::MissingHead { head: 12 },
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_format_summary_sections() {
        let output = ConsoleFormatter::format(&sample_result());
        assert!(output.contains("spacy, stanza"));
        assert!(output.contains("Per Category"));
        assert!(output.contains("CHEMICAL"));
        assert!(output.contains("\"Aspirin\""));
        assert!(output.contains("head index 12 not found"));
        assert!(output.contains("no data"));
    }

    #[test]
    fn test_format_json_plain_result() {
        let json = ConsoleFormatter::format_json(&sample_result(), None);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["num_agreements"], 2);
        assert_eq!(value["agreed_entities"][0]["entity_type"], "CHEMICAL");
    }

    #[test]
    fn test_format_json_with_report() {
        let report = AgreementReport {
            sources: vec!["spacy".to_string(), "stanza".to_string()],
            items: 1,
            complete_items: 1,
            fleiss_kappa: Some(Statistic::new(1.0)),
            krippendorff_alpha: Statistic::new(1.0),
            cohen_kappa: vec![],
            pairwise: vec![],
        };
        let json = ConsoleFormatter::format_json(&sample_result(), Some(&report));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["num_disagreements"], 1);
        assert_eq!(value["agreement"]["items"], 1);
    }

    #[test]
    fn test_format_report_without_fleiss() {
        let report = AgreementReport {
            sources: vec!["a".to_string(), "b".to_string()],
            items: 2,
            complete_items: 0,
            fleiss_kappa: None,
            krippendorff_alpha: Statistic::new(-0.5),
            cohen_kappa: vec![],
            pairwise: vec![],
        };
        let output = ConsoleFormatter::format_report(&report);
        assert!(output.contains("n/a"));
        assert!(output.contains("Poor"));
    }
}
