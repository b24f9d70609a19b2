//! Ordered application of named background filters to one event.
//!
//! Overview
//! - [`FilterOrchestrator::initialize`] builds one filter per entry of
//!   `filters_to_apply` through a [`FilterRegistry`], in that order, and books
//!   the counter histograms when QA is enabled.
//! - [`FilterOrchestrator::apply_filters`] resets and runs every filter on the
//!   same event, counts each verdict exactly once, and ORs them into the
//!   event verdict, which is counted in the aggregate triple.
//! - [`FilterOrchestrator::process_event`] additionally publishes the verdicts
//!   as [`EventFlags`] and turns them into an [`EventStatus`].
//!
//! Counters live here, not in the filters, so a filter only has to answer
//! "background or not" for the event it is given.

mod counters;

pub use counters::{
    VerdictCounts, ALL_EVENTS, BACKGROUND_FOUND, COUNTER_LABELS, NO_BACKGROUND,
};

use crate::config::ModuleConfig;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{EventReport, FilterSummary, FilterVerdict, RunSummary, TimingBreakdown};
use crate::error::{BackgroundError, BackgroundResult};
use crate::event::{Event, EventFlags, EventStatus};
use crate::filters::{BackgroundFilter, FilterRegistry};
use crate::qa::{qa_hist_name, Histogram1D, QaSink};
use log::{debug, error, info, warn};
use std::time::Instant;

/// Aggregate flag published for every processed event.
pub const BACKGROUND_FLAG: &str = "HasBeamBackground";

/// Per-filter flag name, e.g. `HasBeamBackground_StreakSidebandFilter`.
pub fn filter_flag(filter: &str) -> String {
    format!("{BACKGROUND_FLAG}_{filter}Filter")
}

struct FilterSlot {
    filter: Box<dyn BackgroundFilter>,
    counts: VerdictCounts,
    counter_hist: Option<String>,
    flag: String,
}

pub struct FilterOrchestrator {
    config: ModuleConfig,
    slots: Vec<FilterSlot>,
    totals: VerdictCounts,
    totals_hist: Option<String>,
    sink: Option<Box<dyn QaSink>>,
}

impl FilterOrchestrator {
    /// Builds the configured filters from the built-in registry.
    pub fn initialize(config: ModuleConfig, sink: Option<Box<dyn QaSink>>) -> BackgroundResult<Self> {
        Self::with_registry(config, &FilterRegistry::default(), sink)
    }

    pub fn with_registry(
        config: ModuleConfig,
        registry: &FilterRegistry,
        mut sink: Option<Box<dyn QaSink>>,
    ) -> BackgroundResult<Self> {
        if config.debug {
            debug!(
                "FilterOrchestrator::initialize module={} filters={:?}",
                config.module_name, config.filters_to_apply
            );
        }
        config.validate()?;
        if config.do_qa && sink.is_none() {
            error!(
                "FilterOrchestrator::initialize {}: QA requested without a histogram sink",
                config.module_name
            );
            return Err(BackgroundError::MissingSink);
        }

        let mut slots = Vec::with_capacity(config.filters_to_apply.len());
        for name in &config.filters_to_apply {
            let mut filter = registry.create(name, config.filter(name))?;

            let mut counter_hist = None;
            if config.do_qa {
                if let Some(sink) = sink.as_deref_mut() {
                    let hist = qa_hist_name(&config.module_name, name, "nevts", "");
                    sink.book(Histogram1D::labelled(&hist, COUNTER_LABELS))?;
                    filter.book_histograms(&config.module_name, sink)?;
                    counter_hist = Some(hist);
                }
            }

            slots.push(FilterSlot {
                filter,
                counts: VerdictCounts::default(),
                counter_hist,
                flag: filter_flag(name),
            });
        }

        let mut totals_hist = None;
        if config.do_qa {
            if let Some(sink) = sink.as_deref_mut() {
                let hist = qa_hist_name(&config.module_name, "", "nevts", "");
                sink.book(Histogram1D::labelled(&hist, COUNTER_LABELS))?;
                totals_hist = Some(hist);
            }
        }

        info!(
            "{}: initialized {} filter(s) [{}], qa={} abort_on_background={}",
            config.module_name,
            slots.len(),
            config.filters_to_apply.join(", "),
            config.do_qa,
            config.do_evt_abort
        );

        Ok(Self {
            config,
            slots,
            totals: VerdictCounts::default(),
            totals_hist,
            sink,
        })
    }

    /// Runs every filter on `event` and returns whether any found background.
    pub fn apply_filters(&mut self, event: &Event) -> bool {
        self.apply_filters_with_report(event).has_background
    }

    /// Same as [`apply_filters`](Self::apply_filters) with per-filter detail.
    pub fn apply_filters_with_report(&mut self, event: &Event) -> EventReport {
        let start = Instant::now();
        if self.config.debug {
            debug!(
                "FilterOrchestrator::apply_filters event {} through {} filter(s)",
                event.number,
                self.slots.len()
            );
        }

        let mut timing = TimingBreakdown::default();
        let mut verdicts = Vec::with_capacity(self.slots.len());
        let mut has_background = false;

        for slot in &mut self.slots {
            let label = slot.filter.name().to_string();
            slot.filter.reset();
            let found = timing.time(label.clone(), || slot.filter.apply(event));

            slot.counts.record(found);
            if let Some(sink) = self.sink.as_deref_mut() {
                record_counts(sink, slot.counter_hist.as_deref(), found);
                if let Err(err) = slot.filter.fill_histograms(sink) {
                    warn!("FilterOrchestrator: {label} failed to fill QA histograms: {err}");
                }
            }

            has_background |= found;
            verdicts.push(FilterVerdict {
                filter: label,
                has_background: found,
            });
        }

        self.totals.record(has_background);
        if let Some(sink) = self.sink.as_deref_mut() {
            record_counts(sink, self.totals_hist.as_deref(), has_background);
        }

        timing.total_ms = elapsed_ms(start);
        if self.config.debug {
            debug!(
                "FilterOrchestrator::apply_filters event {} has_background={} in {:.3} ms",
                event.number, has_background, timing.total_ms
            );
        }

        EventReport {
            event: event.number,
            has_background,
            verdicts,
            timing,
        }
    }

    /// Applies the filters, publishes per-filter and aggregate flags, and
    /// asks for an abort when background was found and aborting is enabled.
    pub fn process_event(&mut self, event: &Event, flags: &mut EventFlags) -> EventStatus {
        let report = self.apply_filters_with_report(event);
        for (slot, verdict) in self.slots.iter().zip(&report.verdicts) {
            flags.set(slot.flag.clone(), verdict.has_background);
        }
        flags.set(BACKGROUND_FLAG, report.has_background);

        if report.has_background && self.config.do_evt_abort {
            EventStatus::Abort
        } else {
            EventStatus::Ok
        }
    }

    /// Counter snapshot for end-of-run reporting.
    pub fn end(&self) -> RunSummary {
        let summary = RunSummary {
            module: self.config.module_name.clone(),
            filters: self
                .slots
                .iter()
                .map(|slot| FilterSummary {
                    filter: slot.filter.name().to_string(),
                    counts: slot.counts,
                })
                .collect(),
            totals: self.totals,
        };
        for f in &summary.filters {
            info!(
                "{}: {} saw {} event(s), {} with background",
                summary.module, f.filter, f.counts.seen, f.counts.background
            );
        }
        info!(
            "{}: {} event(s) total, {} with background",
            summary.module, summary.totals.seen, summary.totals.background
        );
        summary
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Filter names in application order.
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.filter.name())
    }

    pub fn counts(&self, filter: &str) -> Option<VerdictCounts> {
        self.slots
            .iter()
            .find(|slot| slot.filter.name() == filter)
            .map(|slot| slot.counts)
    }

    pub fn totals(&self) -> VerdictCounts {
        self.totals
    }

    pub fn sink(&self) -> Option<&dyn QaSink> {
        self.sink.as_deref()
    }

}

fn record_counts(sink: &mut dyn QaSink, hist: Option<&str>, has_background: bool) {
    let Some(hist) = hist else {
        return;
    };
    for label in VerdictCounts::labels_for(has_background) {
        if let Err(err) = sink.increment(hist, label) {
            warn!("FilterOrchestrator: failed to record {label:?} in {hist}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::qa::HistogramManager;

    struct Scripted {
        name: String,
        rule: fn(u64) -> bool,
    }

    impl BackgroundFilter for Scripted {
        fn name(&self) -> &str {
            &self.name
        }

        fn reset(&mut self) {}

        fn apply(&mut self, event: &Event) -> bool {
            (self.rule)(event.number)
        }
    }

    fn registry() -> FilterRegistry {
        let mut registry = FilterRegistry::default();
        registry
            .register("Always", |name, _| {
                Box::new(Scripted {
                    name: name.to_string(),
                    rule: |_| true,
                })
            })
            .register("Never", |name, _| {
                Box::new(Scripted {
                    name: name.to_string(),
                    rule: |_| false,
                })
            })
            .register("EvenEvents", |name, _| {
                Box::new(Scripted {
                    name: name.to_string(),
                    rule: |n| n % 2 == 0,
                })
            });
        registry
    }

    fn orchestrator(names: &[&str]) -> FilterOrchestrator {
        let config = ModuleConfig::with_filters(names.iter().copied());
        FilterOrchestrator::with_registry(config, &registry(), Some(Box::new(HistogramManager::new())))
            .expect("valid configuration")
    }

    #[test]
    fn aggregate_is_logical_or() {
        let mut orch = orchestrator(&["Never", "EvenEvents"]);
        let verdicts: Vec<bool> = (0..4).map(|n| orch.apply_filters(&Event::new(n))).collect();
        assert_eq!(verdicts, vec![true, false, true, false]);

        let mut orch = orchestrator(&["Never", "Always"]);
        assert!((0..3).all(|n| orch.apply_filters(&Event::new(n))));

        let mut orch = orchestrator(&["Never"]);
        assert!(!orch.apply_filters(&Event::new(0)));
    }

    #[test]
    fn every_filter_counts_every_event_once() {
        let mut orch = orchestrator(&["Always", "Never", "EvenEvents"]);
        for n in 0..5 {
            orch.apply_filters(&Event::new(n));
        }
        let always = orch.counts("Always").unwrap();
        let never = orch.counts("Never").unwrap();
        let even = orch.counts("EvenEvents").unwrap();
        assert_eq!((always.seen, always.background), (5, 5));
        assert_eq!((never.seen, never.no_background), (5, 5));
        assert_eq!((even.seen, even.background, even.no_background), (5, 3, 2));
        assert_eq!(
            orch.totals(),
            VerdictCounts {
                seen: 5,
                no_background: 0,
                background: 5
            }
        );
    }

    #[test]
    fn counter_histograms_mirror_counts() {
        let mut orch = orchestrator(&["Never", "EvenEvents"]);
        for n in 0..3 {
            orch.apply_filters(&Event::new(n));
        }
        let sink = orch.sink().expect("sink attached");
        let even = sink
            .histogram("h_beambackgroundfilterandqa_evenevents_nevts")
            .expect("per-filter counter booked");
        assert_eq!(even.label_content(ALL_EVENTS), Some(3.0));
        assert_eq!(even.label_content(BACKGROUND_FOUND), Some(2.0));
        assert_eq!(even.label_content(NO_BACKGROUND), Some(1.0));

        let totals = sink
            .histogram("h_beambackgroundfilterandqa_nevts")
            .expect("aggregate counter booked");
        assert_eq!(totals.label_content(ALL_EVENTS), Some(3.0));
        assert_eq!(totals.label_content(BACKGROUND_FOUND), Some(2.0));
    }

    #[test]
    fn filters_run_in_configured_order() {
        let mut orch = orchestrator(&["EvenEvents", "Always", "Never"]);
        let names: Vec<String> = orch.filter_names().map(String::from).collect();
        assert_eq!(names, vec!["EvenEvents", "Always", "Never"]);
        let report = orch.apply_filters_with_report(&Event::new(1));
        let order: Vec<&str> = report.verdicts.iter().map(|v| v.filter.as_str()).collect();
        assert_eq!(order, names);
        assert_eq!(report.verdict("EvenEvents"), Some(false));
        assert_eq!(report.timing.stages.len(), 3);
        assert!(report.timing.stage_ms("Always").is_some());
        assert_eq!(report.timing.stage_ms("Halo"), None);
    }

    #[test]
    fn unknown_filter_fails_initialization() {
        let config = ModuleConfig::with_filters(["Halo"]);
        let err = FilterOrchestrator::initialize(config, Some(Box::new(HistogramManager::new())))
            .err()
            .expect("unknown filter");
        assert!(matches!(err, BackgroundError::Config(_)));
    }

    #[test]
    fn missing_sink_is_fatal_only_with_qa() {
        let config = ModuleConfig::default();
        assert!(matches!(
            FilterOrchestrator::initialize(config.clone(), None),
            Err(BackgroundError::MissingSink)
        ));

        let no_qa = ModuleConfig {
            do_qa: false,
            ..config
        };
        let mut orch = FilterOrchestrator::initialize(no_qa, None).expect("QA disabled");
        assert!(!orch.apply_filters(&Event::new(0)));
        assert_eq!(orch.totals().seen, 1);
    }

    #[test]
    fn invalid_threshold_fails_initialization() {
        let mut config = ModuleConfig::default();
        config.filters.insert(
            crate::filters::STREAK_SIDEBAND.to_string(),
            FilterConfig {
                min_candidate_energy: f32::INFINITY,
                ..Default::default()
            },
        );
        assert!(FilterOrchestrator::initialize(config, Some(Box::new(HistogramManager::new()))).is_err());
    }

    #[test]
    fn process_event_publishes_flags_and_aborts_on_request() {
        let mut config = ModuleConfig::with_filters(["Never", "EvenEvents"]);
        config.do_evt_abort = true;
        let mut orch =
            FilterOrchestrator::with_registry(config, &registry(), Some(Box::new(HistogramManager::new())))
                .unwrap();

        let mut flags = EventFlags::new();
        assert_eq!(orch.process_event(&Event::new(2), &mut flags), EventStatus::Abort);
        assert_eq!(flags.get("HasBeamBackground_EvenEventsFilter"), Some(true));
        assert_eq!(flags.get("HasBeamBackground_NeverFilter"), Some(false));
        assert_eq!(flags.get(BACKGROUND_FLAG), Some(true));

        assert_eq!(orch.process_event(&Event::new(3), &mut flags), EventStatus::Ok);
        assert_eq!(flags.get(BACKGROUND_FLAG), Some(false));
    }

    #[test]
    fn background_without_abort_keeps_event() {
        let mut orch = orchestrator(&["Always"]);
        let mut flags = EventFlags::new();
        assert_eq!(orch.process_event(&Event::new(0), &mut flags), EventStatus::Ok);
        assert_eq!(flags.get(BACKGROUND_FLAG), Some(true));
    }

    #[test]
    fn end_summarises_counters() {
        let mut orch = orchestrator(&["EvenEvents"]);
        for n in 0..4 {
            orch.apply_filters(&Event::new(n));
        }
        let summary = orch.end();
        assert_eq!(summary.module, "BeamBackgroundFilterAndQA");
        assert_eq!(summary.filter("EvenEvents").unwrap().background, 2);
        assert_eq!(summary.totals.seen, 4);
    }
}
