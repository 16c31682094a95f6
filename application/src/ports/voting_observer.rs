//! Voting observer port
//!
//! Defines the interface for reporting progress and diagnostics during a
//! voting run.

use nlp_quorum_domain::{AgreementCounts, AnnotationCategory, SkippedAnnotation, VotingResult};

/// Callback for events during a voting run
///
/// Implementations live in the presentation and infrastructure layers and
/// can render progress or record a structured event log.
pub trait VotingObserver: Send + Sync {
    /// Called once before any category runs
    fn on_run_start(&self, sources: &[String]);

    /// Called when a category pipeline is dispatched
    fn on_category_start(&self, category: AnnotationCategory);

    /// Called when a category pipeline finishes
    fn on_category_complete(&self, category: AnnotationCategory, counts: AgreementCounts);

    /// Called for every input annotation left out of the run
    fn on_annotation_skipped(&self, _skipped: &SkippedAnnotation) {}

    /// Called with the assembled result
    fn on_run_complete(&self, _result: &VotingResult) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoVotingObserver;

impl VotingObserver for NoVotingObserver {
    fn on_run_start(&self, _sources: &[String]) {}
    fn on_category_start(&self, _category: AnnotationCategory) {}
    fn on_category_complete(&self, _category: AnnotationCategory, _counts: AgreementCounts) {}
}

/// An observer that delegates to multiple inner observers.
///
/// Lets the CLI drive a progress display and a JSONL event log from the
/// same run.
pub struct CompositeVotingObserver<'a> {
    delegates: Vec<&'a dyn VotingObserver>,
}

impl<'a> CompositeVotingObserver<'a> {
    pub fn new(delegates: Vec<&'a dyn VotingObserver>) -> Self {
        Self { delegates }
    }
}

/// Macro to delegate a method call to all inner observers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl VotingObserver for CompositeVotingObserver<'_> {
    fn on_run_start(&self, sources: &[String]) {
        delegate!(self, on_run_start, sources);
    }

    fn on_category_start(&self, category: AnnotationCategory) {
        delegate!(self, on_category_start, category);
    }

    fn on_category_complete(&self, category: AnnotationCategory, counts: AgreementCounts) {
        delegate!(self, on_category_complete, category, counts);
    }

    fn on_annotation_skipped(&self, skipped: &SkippedAnnotation) {
        delegate!(self, on_annotation_skipped, skipped);
    }

    fn on_run_complete(&self, result: &VotingResult) {
        delegate!(self, on_run_complete, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl VotingObserver for Recorder {
        fn on_run_start(&self, sources: &[String]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start:{}", sources.len()));
        }

        fn on_category_start(&self, category: AnnotationCategory) {
            self.events.lock().unwrap().push(format!("begin:{}", category));
        }

        fn on_category_complete(&self, category: AnnotationCategory, counts: AgreementCounts) {
            self.events
                .lock()
                .unwrap()
                .push(format!("end:{}:{}", category, counts.agreed));
        }
    }

    #[test]
    fn test_composite_fans_out_in_order() {
        let first = Recorder::default();
        let second = Recorder::default();
        let composite = CompositeVotingObserver::new(vec![&first, &second, &NoVotingObserver]);

        composite.on_run_start(&["spacy".to_string(), "stanza".to_string()]);
        composite.on_category_start(AnnotationCategory::Token);
        composite.on_category_complete(AnnotationCategory::Token, AgreementCounts::new(3, 1));

        let expected = vec!["start:2", "begin:token", "end:token:3"];
        assert_eq!(*first.events.lock().unwrap(), expected);
        assert_eq!(*second.events.lock().unwrap(), expected);
    }
}
