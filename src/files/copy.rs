use std::{
    fs,
    path::{Component, Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Local};

use super::path_exists;
use crate::err::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// `YYYYMMDDHHmmss` in local time.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// `report.json` becomes `report_<timestamp>.json`; a name without an
/// extension just gets the suffix.
pub fn timestamped_name(path: &Path, timestamp: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, timestamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, timestamp),
    }
}

/// `target_folder` with any root or drive prefix dropped, so it always
/// resolves under the source directory.
fn relative_folder(target_folder: &Path) -> PathBuf {
    target_folder
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}

/// Copies `path` next to itself, or into `target_folder` relative to its
/// directory, under a name carrying the source's modification time. An
/// absolute `target_folder` is taken relative to that directory too.
///
/// Returns the copy's file name, or `None` when `path` does not exist. The
/// target folder is created when absent; failing to create it is only
/// logged, and the copy itself then reports the error.
pub fn copy_with_timestamp<P: AsRef<Path>, T: AsRef<Path>>(
    path: P,
    target_folder: T,
) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path_exists(path) {
        log::debug!("{} does not exist, nothing to copy", path.display());
        return Ok(None);
    }

    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(Error::metadata(path))?;
    let timestamp = format_timestamp(modified);

    let target_dir: PathBuf = path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(relative_folder(target_folder.as_ref()));
    if !target_dir.as_os_str().is_empty() {
        if let Err(err) = fs::create_dir_all(&target_dir) {
            log::warn!("cannot create {}: {}", target_dir.display(), err);
        }
    }

    let name = timestamped_name(path, &timestamp);
    let target = target_dir.join(&name);
    fs::copy(path, &target).map_err(|source| Error::Copy {
        from: path.to_path_buf(),
        to: target.clone(),
        source,
    })?;
    log::info!("copied {} to {}", path.display(), target.display());
    Ok(Some(name))
}
