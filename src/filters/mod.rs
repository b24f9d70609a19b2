//! Background filters and the registry that builds them by name.
//!
//! Every filter implements [`BackgroundFilter`]; the orchestrator only talks
//! to that trait. New filters are added by registering a factory with a
//! [`FilterRegistry`] under the name used in `filters_to_apply`.

mod null;
mod streak_sideband;

pub use null::NullFilter;
pub use streak_sideband::StreakSidebandFilter;

use crate::config::FilterConfig;
use crate::error::{BackgroundError, BackgroundResult};
use crate::event::Event;
use crate::qa::QaSink;
use std::collections::BTreeMap;

pub const NULL: &str = "Null";
pub const STREAK_SIDEBAND: &str = "StreakSideband";

/// Common capability set of a beam-background filter.
///
/// Per event a filter goes `reset` → `apply` → (optionally) `fill_histograms`;
/// nothing but its QA bookkeeping survives to the next event.
pub trait BackgroundFilter: Send {
    fn name(&self) -> &str;

    /// Drops any per-event working state.
    fn reset(&mut self);

    /// Returns `true` when the event contains beam background.
    ///
    /// A missing input collection yields `false`.
    fn apply(&mut self, event: &Event) -> bool;

    /// Registers filter-specific histograms under the module prefix.
    fn book_histograms(&mut self, _module: &str, _sink: &mut dyn QaSink) -> BackgroundResult<()> {
        Ok(())
    }

    /// Records the last `apply` into the histograms booked earlier.
    fn fill_histograms(&self, _sink: &mut dyn QaSink) -> BackgroundResult<()> {
        Ok(())
    }
}

pub type FilterFactory = fn(&str, &FilterConfig) -> Box<dyn BackgroundFilter>;

#[derive(Clone, Copy)]
struct Registration {
    factory: FilterFactory,
    /// Whether the filter reads its thresholds, and so needs its own entry.
    needs_options: bool,
}

/// Name → factory map consulted when the orchestrator is initialised.
#[derive(Clone)]
pub struct FilterRegistry {
    factories: BTreeMap<String, Registration>,
}

impl FilterRegistry {
    /// Registry without any filters.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registers a filter that must be given its own configuration entry.
    pub fn register(&mut self, name: impl Into<String>, factory: FilterFactory) -> &mut Self {
        self.insert(name.into(), factory, true)
    }

    /// Registers a filter that ignores the thresholds; it runs with
    /// [`FilterConfig::default`] when no entry is configured for it.
    pub fn register_optionless(
        &mut self,
        name: impl Into<String>,
        factory: FilterFactory,
    ) -> &mut Self {
        self.insert(name.into(), factory, false)
    }

    fn insert(&mut self, name: String, factory: FilterFactory, needs_options: bool) -> &mut Self {
        self.factories.insert(
            name,
            Registration {
                factory,
                needs_options,
            },
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Whether `name` needs its own configuration entry; `None` if unknown.
    pub fn needs_options(&self, name: &str) -> Option<bool> {
        self.factories.get(name).map(|r| r.needs_options)
    }

    /// Builds the filter registered under `name`.
    ///
    /// Fails for unknown names, and when `config` is absent for a filter
    /// registered with [`register`](Self::register).
    pub fn create(
        &self,
        name: &str,
        config: Option<&FilterConfig>,
    ) -> BackgroundResult<Box<dyn BackgroundFilter>> {
        let registration = self.factories.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.names().collect();
            BackgroundError::Config(format!(
                "unknown filter {name} (known: {})",
                known.join(", ")
            ))
        })?;
        match config {
            Some(config) => Ok((registration.factory)(name, config)),
            None if !registration.needs_options => {
                Ok((registration.factory)(name, &FilterConfig::default()))
            }
            None => Err(BackgroundError::Config(format!(
                "no configuration given for filter {name}"
            ))),
        }
    }
}

impl Default for FilterRegistry {
    /// Registry with the built-in `StreakSideband` and `Null` filters.
    /// `Null` needs no configuration entry.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(STREAK_SIDEBAND, |name, cfg| {
                Box::new(StreakSidebandFilter::new(name, cfg.clone()))
            })
            .register_optionless(NULL, |name, cfg| {
                Box::new(NullFilter::new(name, cfg.clone()))
            });
        registry
    }
}
