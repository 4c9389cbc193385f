use std::time::Instant;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::document::RawDocument;
use crate::parser;
use crate::record::{self, AnalysisOutcome, FailurePolicy};

pub const DEFAULT_DOCUMENT_NAME: &str = "Grant Document";

/// Stateless entry point. Cheap to share across threads; every call owns its
/// own document and result.
#[derive(Debug, Clone, Default)]
pub struct Analyzer<C: Clock = SystemClock> {
    clock: C,
    policy: FailurePolicy,
}

impl Analyzer<SystemClock> {
    pub fn new(policy: FailurePolicy) -> Self {
        Analyzer { clock: SystemClock, policy }
    }
}

impl<C: Clock> Analyzer<C> {
    pub fn with_clock(clock: C, policy: FailurePolicy) -> Self {
        Analyzer { clock, policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Analyze one document. Never panics on odd input and never returns a
    /// partial structure: the outcome is a full record or an error envelope.
    pub fn analyze(&self, text: &str, name: Option<&str>) -> AnalysisOutcome {
        let t0 = Instant::now();
        let timestamp = self.clock.now();
        let doc = RawDocument::new(text, name.unwrap_or(DEFAULT_DOCUMENT_NAME));

        let outputs = parser::extract_all(&doc);
        let outcome = record::assemble(&doc, outputs, timestamp, self.policy);

        match &outcome {
            AnalysisOutcome::Record(r) => debug!(
                document = doc.name(),
                field_errors = r.analysis_metadata.field_errors.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "analysis complete"
            ),
            AnalysisOutcome::Failed(e) => warn!(document = doc.name(), error = %e.error, "analysis failed"),
        }
        outcome
    }
}
