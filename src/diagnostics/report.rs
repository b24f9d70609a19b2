use super::timing::TimingBreakdown;
use crate::orchestrator::VerdictCounts;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterVerdict {
    pub filter: String,
    pub has_background: bool,
}

/// Result of running every configured filter on one event.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    pub event: u64,
    /// Logical OR of all filter verdicts.
    pub has_background: bool,
    /// In configured filter order.
    pub verdicts: Vec<FilterVerdict>,
    pub timing: TimingBreakdown,
}

impl EventReport {
    pub fn verdict(&self, filter: &str) -> Option<bool> {
        self.verdicts
            .iter()
            .find(|v| v.filter == filter)
            .map(|v| v.has_background)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    pub filter: String,
    pub counts: VerdictCounts,
}

/// End-of-run counter snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub module: String,
    pub filters: Vec<FilterSummary>,
    pub totals: VerdictCounts,
}

impl RunSummary {
    pub fn filter(&self, name: &str) -> Option<&VerdictCounts> {
        self.filters
            .iter()
            .find(|f| f.filter == name)
            .map(|f| &f.counts)
    }
}
