//! Findings produced by the threshold analyzer

use serde::{Deserialize, Serialize};

/// Categorized findings for one simulation record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub scaling_risks: Vec<String>,
    pub security_risks: Vec<String>,
    pub ux_failures: Vec<String>,
    pub indexer_bottlenecks: Vec<String>,
    pub proposed_changes: Vec<String>,
    pub summary: String,
}

impl Insights {
    /// Total number of risk findings across all categories
    pub fn finding_count(&self) -> usize {
        self.scaling_risks.len()
            + self.security_risks.len()
            + self.ux_failures.len()
            + self.indexer_bottlenecks.len()
    }

    /// True when the run stayed within every threshold
    pub fn is_clean(&self) -> bool {
        self.proposed_changes.is_empty()
    }

    /// Non-empty categories as (label, findings) pairs, in report order
    pub fn categories(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Scaling risks", self.scaling_risks.as_slice()),
            ("Security risks", self.security_risks.as_slice()),
            ("UX failures", self.ux_failures.as_slice()),
            ("Indexer bottlenecks", self.indexer_bottlenecks.as_slice()),
            ("Proposed changes", self.proposed_changes.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .collect()
    }
}
