//! File helpers for events and JSON reports.
//!
//! - `load_events`: read a JSON array of events.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::{BackgroundError, BackgroundResult};
use crate::event::Event;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn load_events(path: &Path) -> BackgroundResult<Vec<Event>> {
    let data = fs::read_to_string(path).map_err(|source| BackgroundError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| BackgroundError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> BackgroundResult<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| BackgroundError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> BackgroundResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| BackgroundError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
