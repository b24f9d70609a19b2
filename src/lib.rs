#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod error;
pub mod event;
pub mod filters;
pub mod orchestrator;
pub mod types;

// Building blocks – public for tools and tests that drive a single stage.
pub mod detector;
pub mod diagnostics;
pub mod grid;
pub mod io;
pub mod qa;
pub mod towers;

// --- High-level re-exports -------------------------------------------------

// Main entry points: orchestrator + configuration.
pub use crate::config::{FilterConfig, ModuleConfig};
pub use crate::error::{BackgroundError, BackgroundResult};
pub use crate::event::{Event, EventFlags, EventStatus};
pub use crate::orchestrator::{FilterOrchestrator, VerdictCounts};

// Filters and the streak algorithm.
pub use crate::detector::{StreakDetector, StreakParams, StreakScan};
pub use crate::filters::{BackgroundFilter, FilterRegistry, NullFilter, StreakSidebandFilter};
pub use crate::grid::TowerGrid;

// Reporting.
pub use crate::diagnostics::{EventReport, RunSummary};
pub use crate::qa::{HistogramManager, QaSink};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for drivers.
///
/// ```no_run
/// use beam_background_filter::prelude::*;
///
/// # fn main() -> Result<(), BackgroundError> {
/// let mut module = FilterOrchestrator::initialize(
///     ModuleConfig::default(),
///     Some(Box::new(HistogramManager::new())),
/// )?;
///
/// let towers = TowerContainer::uniform(EtaMajorMapping::default(), 0, 0.0);
/// let event = Event::new(1).with_collection("TOWERINFO_CALIB_HCALOUT", towers);
/// let has_background = module.apply_filters(&event);
/// println!("background={has_background}");
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::towers::{EtaMajorMapping, TowerContainer};
    pub use crate::{BackgroundError, Event, FilterOrchestrator, HistogramManager, ModuleConfig};
}
