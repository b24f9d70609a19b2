mod common;

use beam_background_filter::filters::STREAK_SIDEBAND;
use beam_background_filter::qa::{qa_hist_name, Histogram1D, QaSink};
use beam_background_filter::towers::TowerSource;
use beam_background_filter::{
    BackgroundFilter, BackgroundResult, Event, FilterConfig, FilterOrchestrator, FilterRegistry,
    HistogramManager, ModuleConfig,
};
use common::synthetic_towers::{paint_phi_slice, streak_event, uniform_ohcal, OHCAL};

/// Flags any event with a single tower above `min_candidate_energy`.
struct HotTowerFilter {
    name: String,
    config: FilterConfig,
    hottest: f32,
    hist: Option<String>,
}

impl BackgroundFilter for HotTowerFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.hottest = 0.0;
    }

    fn apply(&mut self, event: &Event) -> bool {
        if let Some(towers) = event.towers(&self.config.input_selector) {
            self.hottest = towers.readings().map(|r| r.energy).fold(0.0, f32::max);
        }
        self.hottest >= self.config.min_candidate_energy
    }

    fn book_histograms(&mut self, module: &str, sink: &mut dyn QaSink) -> BackgroundResult<()> {
        let name = qa_hist_name(module, &self.name, "hottest", "");
        sink.book(Histogram1D::new(&name, 20, 0.0, 20.0))?;
        self.hist = Some(name);
        Ok(())
    }

    fn fill_histograms(&self, sink: &mut dyn QaSink) -> BackgroundResult<()> {
        if let Some(name) = &self.hist {
            sink.fill(name, f64::from(self.hottest))?;
        }
        Ok(())
    }
}

fn module() -> FilterOrchestrator {
    let mut registry = FilterRegistry::default();
    registry.register("HotTower", |name, cfg| {
        Box::new(HotTowerFilter {
            name: name.to_string(),
            config: cfg.clone(),
            hottest: 0.0,
            hist: None,
        })
    });

    let mut config = ModuleConfig::with_filters([STREAK_SIDEBAND, "HotTower"]);
    config.filters.insert(
        "HotTower".to_string(),
        FilterConfig {
            min_candidate_energy: 10.0,
            ..Default::default()
        },
    );
    FilterOrchestrator::with_registry(config, &registry, Some(Box::new(HistogramManager::new())))
        .expect("custom filter registers")
}

#[test]
fn registered_filter_joins_the_aggregate() {
    let mut module = module();

    let mut towers = uniform_ohcal(0.0);
    paint_phi_slice(&mut towers, 7, 4..5, 15.0);
    let hot = Event::new(1).with_collection(OHCAL, towers);

    let report = module.apply_filters_with_report(&hot);
    assert!(report.has_background);
    assert_eq!(report.verdict(STREAK_SIDEBAND), Some(false));
    assert_eq!(report.verdict("HotTower"), Some(true));

    let report = module.apply_filters_with_report(&streak_event(2, 9, 0, 10));
    assert!(report.has_background);
    assert_eq!(report.verdict(STREAK_SIDEBAND), Some(true));
    assert_eq!(report.verdict("HotTower"), Some(false));

    let hot_counts = module.counts("HotTower").unwrap();
    assert_eq!((hot_counts.seen, hot_counts.background), (2, 1));
    assert_eq!(module.totals().background, 2);

    let hist = module
        .sink()
        .unwrap()
        .histogram("h_beambackgroundfilterandqa_hottower_hottest")
        .unwrap();
    assert_eq!(hist.bin_content(15), Some(1.0));
    assert_eq!(hist.bin_content(1), Some(1.0));
}
