//! Diagnostics returned alongside the filter verdicts.
//!
//! `EventReport` describes one event (per-filter verdicts and timings);
//! `RunSummary` collects every counter triple at the end of a run.

pub mod report;
pub mod timing;

pub use report::{EventReport, FilterSummary, FilterVerdict, RunSummary};
pub use timing::{StageTiming, TimingBreakdown};
