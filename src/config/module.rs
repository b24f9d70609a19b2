use super::filter::FilterConfig;
use crate::error::{BackgroundError, BackgroundResult};
use crate::filters::STREAK_SIDEBAND;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

pub const DEFAULT_MODULE_NAME: &str = "BeamBackgroundFilterAndQA";

/// Module-wide options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Verbose tracing; no effect on verdicts.
    pub debug: bool,
    /// Register counter/QA histograms with the sink.
    pub do_qa: bool,
    /// Ask the driver to drop events where background was found.
    pub do_evt_abort: bool,
    /// Prefix for QA histogram names.
    pub module_name: String,
    /// Filters to run, in order.
    pub filters_to_apply: Vec<String>,
    /// Per-filter configuration, keyed by name. Filters that read thresholds
    /// need an entry here; an absent `filters` object is an empty map, never
    /// the built-in defaults.
    #[serde(default)]
    pub filters: BTreeMap<String, FilterConfig>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        let mut filters = BTreeMap::new();
        filters.insert(STREAK_SIDEBAND.to_string(), FilterConfig::default());
        Self {
            debug: false,
            do_qa: true,
            do_evt_abort: false,
            module_name: DEFAULT_MODULE_NAME.to_string(),
            filters_to_apply: vec![STREAK_SIDEBAND.to_string()],
            filters,
        }
    }
}

impl ModuleConfig {
    /// Config running exactly `names`, each with default filter options.
    pub fn with_filters<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let filters_to_apply: Vec<String> = names.into_iter().map(Into::into).collect();
        let filters = filters_to_apply
            .iter()
            .map(|name| (name.clone(), FilterConfig::default()))
            .collect();
        Self {
            filters_to_apply,
            filters,
            ..Default::default()
        }
    }

    pub fn filter(&self, name: &str) -> Option<&FilterConfig> {
        self.filters.get(name)
    }

    /// Structural checks that do not need the filter registry.
    ///
    /// Whether a listed filter may run without an entry in `filters` is up to
    /// the registry and is checked when the orchestrator is built.
    pub fn validate(&self) -> BackgroundResult<()> {
        if self.module_name.trim().is_empty() {
            return Err(BackgroundError::Config("module_name is empty".into()));
        }
        let mut seen = BTreeSet::new();
        for name in &self.filters_to_apply {
            if !seen.insert(name.as_str()) {
                return Err(BackgroundError::Config(format!(
                    "filter {name} listed more than once in filters_to_apply"
                )));
            }
            if let Some(cfg) = self.filters.get(name) {
                cfg.validate(name)?;
            }
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> BackgroundResult<ModuleConfig> {
    let data = fs::read_to_string(path).map_err(|source| BackgroundError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| BackgroundError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
