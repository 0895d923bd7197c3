use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use menuwise_core::{DomainError, DomainResult};

use crate::job::AnalysisJob;

/// Serialisable outcome of an analysis job.
///
/// This is what the narration layer receives: structured numbers plus a
/// one-line machine summary. Turning it into prose is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Analysis kind, e.g. `menu.performance`.
    pub kind: String,

    /// Short count-based summary (not narration).
    pub summary: String,

    /// The analyzer's report, encoded as JSON.
    pub payload: JsonValue,
}

impl Insight {
    pub fn new(kind: impl Into<String>, summary: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            kind: kind.into(),
            summary: summary.into(),
            payload,
        }
    }

    /// Run `job` and wrap its report.
    pub fn from_job<J: AnalysisJob>(job: &J) -> DomainResult<Self> {
        let output = job.run()?;
        let summary = job.summarize(&output);
        let payload = serde_json::to_value(&output)
            .map_err(|e| DomainError::Internal(format!("failed to encode {}: {e}", job.kind())))?;
        Ok(Self::new(job.kind(), summary, payload))
    }
}
