use std::collections::BTreeMap;

use serde::Serialize;
use super::classifier::{ClassifierResult, Specialist};

/// Combined output of one analysis request. Serializes to a flat object:
/// one key per specialist plus the computed fields.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    #[serde(flatten)]
    pub results: BTreeMap<Specialist, ClassifierResult>,
    pub cumulative_severity_score: u8,
    /// Absent until the summarization step has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
}

impl AggregateReport {
    pub fn result(&self, specialist: Specialist) -> Option<&ClassifierResult> {
        self.results.get(&specialist)
    }

    /// Number of specialists whose slot holds an error.
    pub fn failed_count(&self) -> usize {
        self.results.values().filter(|r| r.is_error()).count()
    }
}
