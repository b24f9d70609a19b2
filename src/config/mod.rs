//! Serde-backed configuration for the module and its filters.
//!
//! - [`filter`]: per-filter thresholds and input selection.
//! - [`module`]: module-wide switches, filter order, and JSON loading.

pub mod filter;
pub mod module;

pub use filter::FilterConfig;
pub use module::{load_config, ModuleConfig};
