//! Progress reporting for voting runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use nlp_quorum_application::ports::voting_observer::VotingObserver;
use nlp_quorum_domain::{AgreementCounts, AnnotationCategory, SkippedAnnotation};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per category.
///
/// Categories may run concurrently, so each gets its own bar.
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<AnnotationCategory, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn category_display_name(category: AnnotationCategory) -> &'static str {
        match category {
            AnnotationCategory::Token => "Tokens",
            AnnotationCategory::Dependency => "Dependencies",
            AnnotationCategory::Entity => "Entities",
        }
    }

    fn counts_message(counts: AgreementCounts) -> String {
        format!(
            "{} agreed, {} disagreed",
            counts.agreed.to_string().green(),
            counts.disagreed.to_string().yellow()
        )
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl VotingObserver for ProgressReporter {
    fn on_run_start(&self, sources: &[String]) {
        let _ = self.multi.println(format!(
            "{} Voting across {} sources: {}",
            "->".cyan(),
            sources.len(),
            sources.join(", ")
        ));
    }

    fn on_category_start(&self, category: AnnotationCategory) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::category_display_name(category));
        pb.set_message("voting...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(category, pb);
        }
    }

    fn on_category_complete(&self, category: AnnotationCategory, counts: AgreementCounts) {
        let pb = self.bars.lock().ok().and_then(|mut bars| bars.remove(&category));
        if let Some(pb) = pb {
            pb.finish_with_message(Self::counts_message(counts));
        }
    }

    fn on_annotation_skipped(&self, skipped: &SkippedAnnotation) {
        let _ = self.multi.println(format!(
            "  {} {} {} #{}: {}",
            "!".yellow(),
            skipped.source,
            skipped.category,
            skipped.position,
            skipped.reason
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl VotingObserver for SimpleProgress {
    fn on_run_start(&self, sources: &[String]) {
        eprintln!(
            "{} Voting across {} sources: {}",
            "->".cyan(),
            sources.len(),
            sources.join(", ")
        );
    }

    fn on_category_start(&self, _category: AnnotationCategory) {}

    fn on_category_complete(&self, category: AnnotationCategory, counts: AgreementCounts) {
        eprintln!(
            "  {} {}: {}",
            "v".green(),
            ProgressReporter::category_display_name(category).bold(),
            ProgressReporter::counts_message(counts)
        );
    }
}
