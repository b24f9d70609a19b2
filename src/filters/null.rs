//! A filter that never finds background.
//!
//! Serves as the minimal example of the [`BackgroundFilter`] contract: it
//! checks that its input exists, books one histogram, and always returns
//! `false`.
use super::BackgroundFilter;
use crate::config::FilterConfig;
use crate::error::BackgroundResult;
use crate::event::Event;
use crate::qa::{make_qa_hist_names, Histogram1D, QaSink};
use log::debug;

pub struct NullFilter {
    name: String,
    config: FilterConfig,
    hists: Vec<String>,
    saw_input: bool,
}

impl NullFilter {
    pub fn new(name: impl Into<String>, config: FilterConfig) -> Self {
        Self {
            name: name.into(),
            config,
            hists: Vec::new(),
            saw_input: false,
        }
    }
}

impl BackgroundFilter for NullFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.saw_input = false;
    }

    fn apply(&mut self, event: &Event) -> bool {
        self.saw_input = event.towers(&self.config.input_selector).is_some();
        if self.config.traces() {
            debug!(
                "NullFilter[{}]::apply event {} input_present={}",
                self.name, event.number, self.saw_input
            );
        }
        false
    }

    fn book_histograms(&mut self, module: &str, sink: &mut dyn QaSink) -> BackgroundResult<()> {
        let names = make_qa_hist_names(&["test"], module, &self.name, "");
        for name in &names {
            sink.book(Histogram1D::new(name, 2, -0.5, 1.5))?;
        }
        self.hists = names;
        Ok(())
    }

    fn fill_histograms(&self, sink: &mut dyn QaSink) -> BackgroundResult<()> {
        for name in &self.hists {
            sink.fill(name, f64::from(u8::from(self.saw_input)))?;
        }
        Ok(())
    }
}
