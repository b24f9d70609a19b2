use beam_background_filter::towers::{EtaMajorMapping, TowerContainer};
use beam_background_filter::Event;

pub const OHCAL: &str = "TOWERINFO_CALIB_HCALOUT";
pub const GOOD: u8 = 0;

/// Full outer-HCal collection, every tower good with the same energy.
pub fn uniform_ohcal(energy: f32) -> TowerContainer {
    TowerContainer::uniform(EtaMajorMapping::default(), GOOD, energy)
}

/// Paints `energy` into `phi` for every eta in `etas`.
pub fn paint_phi_slice(
    towers: &mut TowerContainer,
    phi: usize,
    etas: std::ops::Range<usize>,
    energy: f32,
) {
    for eta in etas {
        assert!(towers.upsert(eta, phi, GOOD, energy), "({eta}, {phi}) outside grid");
    }
}

/// Quiet calorimeter with a single streak of `length` towers at `phi`,
/// starting at eta `first_eta`.
pub fn streak_event(number: u64, phi: usize, first_eta: usize, length: usize) -> Event {
    let mut towers = uniform_ohcal(0.0);
    paint_phi_slice(&mut towers, phi, first_eta..first_eta + length, 1.0);
    Event::new(number).with_collection(OHCAL, towers)
}

pub fn quiet_event(number: u64) -> Event {
    Event::new(number).with_collection(OHCAL, uniform_ohcal(0.0))
}
