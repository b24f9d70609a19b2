//! Streak detection on the outer-HCal tower grid.
//!
//! Overview
//! - A tower is a streak *candidate* when its status is good and its energy
//!   reaches `min_candidate_energy`.
//! - Its two phi neighbours (same eta, periodic in phi) form the *sideband*.
//!   Both must be good and at most `max_neighbor_energy`, otherwise the
//!   candidate is discarded.
//! - Surviving candidates are accumulated per phi bin. The event is flagged
//!   when the largest per-phi count exceeds `min_streak_count`.
//!
//! Modules
//! - [`params`] – thresholds and the increment policy.
//! - `streak` – the [`StreakDetector`] and its [`StreakScan`] result.

pub mod params;
mod streak;

pub use params::{ScanOrder, StreakIncrement, StreakParams};
pub use streak::{StreakDetector, StreakScan};
