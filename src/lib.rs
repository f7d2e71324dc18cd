pub mod config;
pub mod diff;
pub mod err;
pub mod files;
pub mod json;
pub mod logging;
pub mod util;

use std::{fs, path::Path};

use serde_json::Value;

pub use crate::{
    diff::{CollectionDiff, KeySpec, Record},
    err::{Error, Result},
    files::{CompareMode, copy_with_timestamp, files_identical, path_exists},
};

/// Reads a snapshot stored as a JSON array of records.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(Error::read(path))?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Collection {
        path: path.to_path_buf(),
        source,
    })
}

/// Diffs two snapshot files on `key`.
pub fn diff_snapshots<P: AsRef<Path>, Q: AsRef<Path>>(
    older: P,
    newer: Q,
    key: &KeySpec,
) -> Result<CollectionDiff> {
    log::info!("reading older snapshot...");
    let older = read_snapshot(older)?;
    log::info!("reading newer snapshot...");
    let newer = read_snapshot(newer)?;
    log::info!("comparing on key {}...", key);
    let diff = CollectionDiff::from_compare(&older, &newer, key);
    let summary = diff.summary();
    log::debug!(
        "added: {}, removed: {}, shared: {}",
        summary.added,
        summary.removed,
        summary.shared
    );
    Ok(diff)
}
