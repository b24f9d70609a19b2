//! Parameter types configuring the streak detector.
//!
//! Defaults are the nominal outer-HCal values: candidates at 0.6 GeV or
//! more, sidebands at 0.06 GeV or less, and more than 5 streaky towers in a
//! single phi slice.

use serde::{Deserialize, Serialize};

/// Which per-phi counters a surviving candidate contributes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakIncrement {
    /// Only the candidate's own phi bin.
    #[default]
    Candidate,
    /// The candidate's phi bin and its "up" neighbour.
    CandidateAndUp,
}

/// Loop nesting used while scanning the grid. Results do not depend on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// Outer loop over phi, inner over eta.
    #[default]
    PhiMajor,
    /// Outer loop over eta, inner over phi.
    EtaMajor,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreakParams {
    /// Minimum energy for a tower to be a streak candidate.
    pub min_candidate_energy: f32,
    /// Maximum energy allowed in either phi neighbour of a candidate.
    pub max_neighbor_energy: f32,
    /// The event is flagged when the longest streak exceeds this.
    pub min_streak_count: u32,
    /// Status code of a good, calibrated tower.
    pub good_status: u8,
    pub increment: StreakIncrement,
}

impl Default for StreakParams {
    fn default() -> Self {
        Self {
            min_candidate_energy: 0.6,
            max_neighbor_energy: 0.06,
            min_streak_count: 5,
            good_status: 0,
            increment: StreakIncrement::Candidate,
        }
    }
}
