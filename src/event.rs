//! Per-event input and output records.
//!
//! - `Event`: named tower collections for one event, selected by a filter's
//!   `input_selector`.
//! - `EventFlags`: boolean flags published for downstream consumers.
//! - `EventStatus`: what the driver should do with the event.
use crate::towers::TowerContainer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub collections: BTreeMap<String, TowerContainer>,
}

impl Event {
    pub fn new(number: u64) -> Self {
        Self {
            number,
            collections: BTreeMap::new(),
        }
    }

    pub fn with_collection(mut self, name: impl Into<String>, towers: TowerContainer) -> Self {
        self.insert(name, towers);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, towers: TowerContainer) {
        self.collections.insert(name.into(), towers);
    }

    /// Tower collection registered under `selector`, if present this event.
    pub fn towers(&self, selector: &str) -> Option<&TowerContainer> {
        self.collections.get(selector)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EventFlags {
    flags: BTreeMap<String, bool>,
}

impl EventFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Keep processing the event downstream.
    Ok,
    /// Background found and aborting was requested.
    Abort,
}
