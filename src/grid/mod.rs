//! Fixed (eta, phi) tower grid rebuilt every event.
//!
//! The grid owns a single cell buffer allocated once; [`TowerGrid::reset`]
//! returns every cell to [`Tower::UNSET`] in place and
//! [`TowerGrid::build`] copies the current event's readings on top.
//! Phi is periodic: bin `n_phi - 1` and bin `0` are neighbours.

use crate::towers::TowerSource;
use crate::types::{Tower, N_ETA, N_PHI};
use log::warn;

#[derive(Clone, Debug, PartialEq)]
pub struct TowerGrid {
    n_eta: usize,
    n_phi: usize,
    cells: Vec<Tower>,
}

impl TowerGrid {
    pub fn new(n_eta: usize, n_phi: usize) -> Self {
        Self {
            n_eta,
            n_phi,
            cells: vec![Tower::UNSET; n_eta * n_phi],
        }
    }

    /// Grid matching the outer-HCal segmentation (24 x 64).
    pub fn ohcal() -> Self {
        Self::new(N_ETA, N_PHI)
    }

    pub fn n_eta(&self) -> usize {
        self.n_eta
    }

    pub fn n_phi(&self) -> usize {
        self.n_phi
    }

    /// Returns every cell to the unset sentinel.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// Copies readings from `source` into their cells and returns how many
    /// were placed.
    ///
    /// Call [`reset`](Self::reset) first; cells with no reading keep whatever
    /// they held. A missing source leaves the grid untouched. Readings whose
    /// channel falls outside the grid are skipped.
    pub fn build<S: TowerSource + ?Sized>(&mut self, source: Option<&S>) -> usize {
        let Some(source) = source else {
            return 0;
        };
        let mut placed = 0;
        for index in 0..source.size() {
            let Some(reading) = source.reading(index) else {
                continue;
            };
            match source.locate(reading.channel) {
                Some((eta, phi)) if eta < self.n_eta && phi < self.n_phi => {
                    let offset = self.offset(eta, phi);
                    self.cells[offset].set_info(&reading);
                    placed += 1;
                }
                _ => warn!(
                    "TowerGrid::build channel {} does not map into the {}x{} grid, skipping",
                    reading.channel, self.n_eta, self.n_phi
                ),
            }
        }
        placed
    }

    /// Reset followed by build.
    pub fn rebuild<S: TowerSource + ?Sized>(&mut self, source: Option<&S>) -> usize {
        self.reset();
        self.build(source)
    }

    #[inline]
    fn offset(&self, eta: usize, phi: usize) -> usize {
        assert!(
            eta < self.n_eta && phi < self.n_phi,
            "({eta}, {phi}) outside the {}x{} grid",
            self.n_eta,
            self.n_phi
        );
        eta * self.n_phi + phi
    }

    /// Cell at (eta, phi).
    ///
    /// # Panics
    /// Panics if `eta >= n_eta` or `phi >= n_phi`.
    pub fn get(&self, eta: usize, phi: usize) -> &Tower {
        &self.cells[self.offset(eta, phi)]
    }

    /// # Panics
    /// Panics if `eta >= n_eta` or `phi >= n_phi`.
    pub fn set(&mut self, eta: usize, phi: usize, tower: Tower) {
        let offset = self.offset(eta, phi);
        self.cells[offset] = tower;
    }

    /// All cells at one eta, indexed by phi.
    ///
    /// # Panics
    /// Panics if `eta >= n_eta`.
    pub fn row(&self, eta: usize) -> &[Tower] {
        let start = self.offset(eta, 0);
        &self.cells[start..start + self.n_phi]
    }

    pub fn cells(&self) -> &[Tower] {
        &self.cells
    }

    pub fn phi_up(&self, phi: usize) -> usize {
        (phi + 1) % self.n_phi
    }

    pub fn phi_down(&self, phi: usize) -> usize {
        if phi == 0 {
            self.n_phi - 1
        } else {
            phi - 1
        }
    }

    pub fn is_unset(&self) -> bool {
        self.cells.iter().all(Tower::is_unset)
    }
}

impl Default for TowerGrid {
    fn default() -> Self {
        Self::ohcal()
    }
}
