use std::path::Path;

/// Whether `path` exists, as a file or a directory.
///
/// A path that cannot be inspected, for lack of permission or otherwise, is
/// reported as absent.
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match path.try_exists() {
        Ok(exists) => exists,
        Err(err) => {
            log::trace!("cannot stat {}: {}", path.display(), err);
            false
        }
    }
}
