use super::params::{ScanOrder, StreakIncrement, StreakParams};
use crate::grid::TowerGrid;
use crate::types::Tower;
use serde::Serialize;

/// Outcome of one scan over a tower grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakScan {
    /// Towers passing the candidate test.
    pub candidates: usize,
    /// Candidates whose sidebands were both quiet.
    pub streaky: usize,
    /// Largest per-phi streak count.
    pub max_streak: u32,
    /// First phi bin reaching `max_streak`, if any tower counted.
    pub max_phi: Option<usize>,
    /// `max_streak > min_streak_count`.
    pub found: bool,
}

/// Candidate/sideband streak finder.
///
/// Holds the per-phi counter array between calls so repeated scans do not
/// allocate; the counters are zeroed at the start of every scan.
#[derive(Clone, Debug)]
pub struct StreakDetector {
    params: StreakParams,
    streaks: Vec<u32>,
}

impl StreakDetector {
    pub fn new(params: StreakParams) -> Self {
        Self {
            params,
            streaks: Vec::new(),
        }
    }

    pub fn is_candidate(&self, tower: &Tower) -> bool {
        tower.status == self.params.good_status && tower.energy >= self.params.min_candidate_energy
    }

    pub fn is_quiet_sideband(&self, tower: &Tower) -> bool {
        tower.status == self.params.good_status && tower.energy <= self.params.max_neighbor_energy
    }

    pub fn detect(&mut self, grid: &TowerGrid) -> bool {
        self.scan(grid).found
    }

    pub fn scan(&mut self, grid: &TowerGrid) -> StreakScan {
        self.scan_with_order(grid, ScanOrder::PhiMajor)
    }

    pub fn scan_with_order(&mut self, grid: &TowerGrid, order: ScanOrder) -> StreakScan {
        self.streaks.clear();
        self.streaks.resize(grid.n_phi(), 0);

        let mut scan = StreakScan::default();
        match order {
            ScanOrder::PhiMajor => {
                for phi in 0..grid.n_phi() {
                    for eta in 0..grid.n_eta() {
                        self.visit(grid, eta, phi, &mut scan);
                    }
                }
            }
            ScanOrder::EtaMajor => {
                for eta in 0..grid.n_eta() {
                    for phi in 0..grid.n_phi() {
                        self.visit(grid, eta, phi, &mut scan);
                    }
                }
            }
        }

        let mut best: Option<(usize, u32)> = None;
        for (phi, &count) in self.streaks.iter().enumerate() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((phi, count));
            }
        }
        scan.max_streak = best.map_or(0, |(_, c)| c);
        scan.max_phi = best.map(|(phi, _)| phi);
        scan.found = scan.max_streak > self.params.min_streak_count;
        scan
    }

    /// Per-phi streak counts from the most recent scan.
    pub fn streak_counts(&self) -> &[u32] {
        &self.streaks
    }

    fn visit(&mut self, grid: &TowerGrid, eta: usize, phi: usize, scan: &mut StreakScan) {
        if !self.is_candidate(grid.get(eta, phi)) {
            return;
        }
        scan.candidates += 1;

        let up = grid.phi_up(phi);
        let down = grid.phi_down(phi);
        if !self.is_quiet_sideband(grid.get(eta, up)) || !self.is_quiet_sideband(grid.get(eta, down))
        {
            return;
        }
        scan.streaky += 1;

        self.streaks[phi] += 1;
        if self.params.increment == StreakIncrement::CandidateAndUp {
            self.streaks[up] += 1;
        }
    }
}

impl Default for StreakDetector {
    fn default() -> Self {
        Self::new(StreakParams::default())
    }
}
