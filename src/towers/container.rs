//! Owned tower collection with its channel mapping.
//!
//! - `EtaMajorMapping`: `channel = eta * n_phi + phi`, the default layout.
//! - `TowerContainer`: flat list of readings, deserializable from event files.
use super::{ChannelMapping, TowerSource};
use crate::types::{TowerReading, N_ETA, N_PHI};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtaMajorMapping {
    pub n_eta: usize,
    pub n_phi: usize,
}

impl EtaMajorMapping {
    pub fn new(n_eta: usize, n_phi: usize) -> Self {
        Self { n_eta, n_phi }
    }

    /// Number of channels, or `None` when `n_eta * n_phi` overflows.
    pub fn channels(&self) -> Option<usize> {
        self.n_eta.checked_mul(self.n_phi)
    }
}

impl Default for EtaMajorMapping {
    fn default() -> Self {
        Self::new(N_ETA, N_PHI)
    }
}

impl ChannelMapping for EtaMajorMapping {
    fn decode(&self, channel: u32) -> Option<(usize, usize)> {
        let channel = channel as usize;
        let total = self.channels()?;
        if self.n_phi == 0 || channel >= total {
            return None;
        }
        Some((channel / self.n_phi, channel % self.n_phi))
    }

    fn encode(&self, eta: usize, phi: usize) -> Option<u32> {
        if eta >= self.n_eta || phi >= self.n_phi {
            return None;
        }
        let channel = eta.checked_mul(self.n_phi)?.checked_add(phi)?;
        u32::try_from(channel).ok()
    }
}

/// Flat per-event list of tower readings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TowerContainer {
    #[serde(default)]
    pub mapping: EtaMajorMapping,
    #[serde(default)]
    pub towers: Vec<TowerReading>,
}

impl TowerContainer {
    pub fn new(mapping: EtaMajorMapping) -> Self {
        Self {
            mapping,
            towers: Vec::new(),
        }
    }

    /// Every channel of the layer present with the same status and energy.
    ///
    /// Channels beyond the `u32` range are not representable and are left out.
    pub fn uniform(mapping: EtaMajorMapping, status: u8, energy: f32) -> Self {
        let towers = (0..mapping.channels().unwrap_or(0))
            .map_while(|c| u32::try_from(c).ok())
            .map(|channel| TowerReading::new(channel, status, energy))
            .collect();
        Self { mapping, towers }
    }

    pub fn push(&mut self, reading: TowerReading) {
        self.towers.push(reading);
    }

    /// Overwrites the reading at (eta, phi), appending it when absent.
    /// Returns `false` if the position is outside the mapping.
    pub fn upsert(&mut self, eta: usize, phi: usize, status: u8, energy: f32) -> bool {
        let Some(channel) = self.mapping.encode(eta, phi) else {
            return false;
        };
        match self.towers.iter_mut().find(|t| t.channel == channel) {
            Some(existing) => {
                existing.status = status;
                existing.energy = energy;
            }
            None => self.push(TowerReading::new(channel, status, energy)),
        }
        true
    }

}

impl TowerSource for TowerContainer {
    fn size(&self) -> usize {
        self.towers.len()
    }

    fn reading(&self, index: usize) -> Option<TowerReading> {
        self.towers.get(index).copied()
    }

    fn locate(&self, channel: u32) -> Option<(usize, usize)> {
        self.mapping.decode(channel)
    }
}
