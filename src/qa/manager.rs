use super::histogram::Histogram1D;
use crate::error::{BackgroundError, BackgroundResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Destination for QA counters and histograms.
///
/// Injected into the orchestrator at construction; nothing in this crate
/// reaches for a process-wide manager.
pub trait QaSink: Send {
    fn book(&mut self, hist: Histogram1D) -> BackgroundResult<()>;

    fn increment(&mut self, name: &str, label: &str) -> BackgroundResult<()>;

    fn fill(&mut self, name: &str, value: f64) -> BackgroundResult<()>;

    fn histogram(&self, name: &str) -> Option<&Histogram1D>;

    /// Every booked histogram, ordered by name.
    fn booked(&self) -> Vec<&Histogram1D>;
}

/// In-memory histogram registry, serializable for end-of-run output.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HistogramManager {
    histograms: BTreeMap<String, Histogram1D>,
}

impl HistogramManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_mut(&mut self, name: &str) -> BackgroundResult<&mut Histogram1D> {
        self.histograms
            .get_mut(name)
            .ok_or_else(|| BackgroundError::UnknownHistogram(name.to_string()))
    }
}

impl QaSink for HistogramManager {
    fn book(&mut self, hist: Histogram1D) -> BackgroundResult<()> {
        if self.histograms.contains_key(&hist.name) {
            return Err(BackgroundError::DuplicateHistogram(hist.name));
        }
        self.histograms.insert(hist.name.clone(), hist);
        Ok(())
    }

    fn increment(&mut self, name: &str, label: &str) -> BackgroundResult<()> {
        let hist = self.get_mut(name)?;
        if hist.increment(label) {
            Ok(())
        } else {
            Err(BackgroundError::UnknownBin {
                hist: name.to_string(),
                label: label.to_string(),
            })
        }
    }

    fn fill(&mut self, name: &str, value: f64) -> BackgroundResult<()> {
        self.get_mut(name)?.fill(value);
        Ok(())
    }

    fn histogram(&self, name: &str) -> Option<&Histogram1D> {
        self.histograms.get(name)
    }

    fn booked(&self) -> Vec<&Histogram1D> {
        self.histograms.values().collect()
    }
}
