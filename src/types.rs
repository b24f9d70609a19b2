use serde::{Deserialize, Serialize};

/// Number of outer-HCal towers along eta.
pub const N_ETA: usize = 24;
/// Number of outer-HCal towers along phi.
pub const N_PHI: usize = 64;

/// One raw channel reading as delivered by the calorimeter collection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerReading {
    pub channel: u32,
    pub status: u8,
    pub energy: f32,
}

impl TowerReading {
    pub fn new(channel: u32, status: u8, energy: f32) -> Self {
        Self {
            channel,
            status,
            energy,
        }
    }
}

/// Per-event state of a single grid cell.
///
/// Cells hold no identity beyond their grid position; they are re-derived
/// from a [`TowerReading`] every event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub status: u8,
    pub energy: f32,
}

impl Tower {
    pub const UNSET_STATUS: u8 = 0;
    pub const UNSET_ENERGY: f32 = -1.0;

    /// Sentinel every cell returns to before a new event is built.
    pub const UNSET: Tower = Tower {
        status: Self::UNSET_STATUS,
        energy: Self::UNSET_ENERGY,
    };

    pub fn new(status: u8, energy: f32) -> Self {
        Self { status, energy }
    }

    pub fn set_info(&mut self, reading: &TowerReading) {
        self.status = reading.status;
        self.energy = reading.energy;
    }

    pub fn reset(&mut self) {
        *self = Self::UNSET;
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }
}

impl Default for Tower {
    fn default() -> Self {
        Self::UNSET
    }
}
