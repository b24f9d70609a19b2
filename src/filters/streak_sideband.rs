//! Streak identification by comparing candidates against their phi sidebands.
use super::BackgroundFilter;
use crate::config::FilterConfig;
use crate::detector::{StreakDetector, StreakScan};
use crate::error::BackgroundResult;
use crate::event::Event;
use crate::grid::TowerGrid;
use crate::qa::{qa_hist_name, Histogram1D, QaSink};
use crate::types::N_ETA;
use log::{debug, warn};

/// Flags events whose outer-HCal grid contains a sideband-isolated streak.
pub struct StreakSidebandFilter {
    name: String,
    config: FilterConfig,
    grid: TowerGrid,
    detector: StreakDetector,
    last_scan: StreakScan,
    streak_hist: Option<String>,
    warned_missing_input: bool,
}

impl StreakSidebandFilter {
    pub fn new(name: impl Into<String>, config: FilterConfig) -> Self {
        let detector = StreakDetector::new(config.streak_params());
        Self {
            name: name.into(),
            config,
            grid: TowerGrid::ohcal(),
            detector,
            last_scan: StreakScan::default(),
            streak_hist: None,
            warned_missing_input: false,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Grid built for the most recent event.
    pub fn grid(&self) -> &TowerGrid {
        &self.grid
    }

    pub fn last_scan(&self) -> &StreakScan {
        &self.last_scan
    }
}

impl BackgroundFilter for StreakSidebandFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.grid.reset();
        self.last_scan = StreakScan::default();
    }

    fn apply(&mut self, event: &Event) -> bool {
        if self.config.traces() {
            debug!(
                "StreakSidebandFilter[{}]::apply checking event {} for streaks via sidebands",
                self.name, event.number
            );
        }

        let towers = event.towers(&self.config.input_selector);
        if towers.is_none() {
            if self.warned_missing_input {
                debug!(
                    "StreakSidebandFilter[{}] input {} missing in event {}, no background assumed",
                    self.name, self.config.input_selector, event.number
                );
            } else {
                warn!(
                    "StreakSidebandFilter[{}] input {} missing, events without it are treated as background-free",
                    self.name, self.config.input_selector
                );
                self.warned_missing_input = true;
            }
        }

        self.grid.reset();
        self.grid.build(towers);
        self.last_scan = self.detector.scan(&self.grid);

        if self.config.traces() {
            debug!(
                "StreakSidebandFilter[{}] candidates={} streaky={} max_streak={} found={}",
                self.name,
                self.last_scan.candidates,
                self.last_scan.streaky,
                self.last_scan.max_streak,
                self.last_scan.found
            );
        }
        self.last_scan.found
    }

    fn book_histograms(&mut self, module: &str, sink: &mut dyn QaSink) -> BackgroundResult<()> {
        let name = qa_hist_name(module, &self.name, "nstreaktwr", "");
        // Double increments can put up to two counts per eta row in one bin.
        let max = 2 * N_ETA;
        sink.book(Histogram1D::new(&name, max + 1, -0.5, max as f64 + 0.5))?;
        self.streak_hist = Some(name);
        Ok(())
    }

    fn fill_histograms(&self, sink: &mut dyn QaSink) -> BackgroundResult<()> {
        if let Some(name) = &self.streak_hist {
            sink.fill(name, f64::from(self.last_scan.max_streak))?;
        }
        Ok(())
    }
}
