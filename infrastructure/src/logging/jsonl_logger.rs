//! JSONL file writer for voting events.
//!
//! Each observer callback becomes a single JSON line with a `type` field and
//! `timestamp`, appended to the file via a buffered writer.

use nlp_quorum_application::ports::voting_observer::VotingObserver;
use nlp_quorum_domain::{AgreementCounts, AnnotationCategory, SkippedAnnotation, VotingResult};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL voting logger that writes one JSON object per event.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlVotingLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlVotingLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create voting log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create voting log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_event(&self, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), Value::String(event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&Value::Object(record)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl VotingObserver for JsonlVotingLogger {
    fn on_run_start(&self, sources: &[String]) {
        self.write_event("run_start", json!({ "sources": sources }));
    }

    fn on_category_start(&self, category: AnnotationCategory) {
        self.write_event("category_start", json!({ "category": category }));
    }

    fn on_category_complete(&self, category: AnnotationCategory, counts: AgreementCounts) {
        self.write_event(
            "category_complete",
            json!({
                "category": category,
                "agreed": counts.agreed,
                "disagreed": counts.disagreed,
            }),
        );
    }

    fn on_annotation_skipped(&self, skipped: &SkippedAnnotation) {
        let payload = serde_json::to_value(skipped).unwrap_or(Value::Null);
        self.write_event("annotation_skipped", payload);
    }

    fn on_run_complete(&self, result: &VotingResult) {
        self.write_event(
            "run_complete",
            json!({
                "agreement_score": result.agreement_score,
                "num_agreements": result.num_agreements,
                "num_disagreements": result.num_disagreements,
                "participating_sources": result.participating_sources,
                "skipped": result.skipped.len(),
            }),
        );
    }
}

impl Drop for JsonlVotingLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
