//! QA histogram plumbing.
//!
//! - [`histogram`]: fixed-binning 1D histogram with optional bin labels.
//! - [`manager`]: the [`QaSink`] trait and its in-memory [`HistogramManager`].
//! - [`naming`]: QA-compliant histogram names.

pub mod histogram;
pub mod manager;
pub mod naming;

pub use histogram::Histogram1D;
pub use manager::{HistogramManager, QaSink};
pub use naming::{make_qa_hist_names, qa_hist_name};
