//! Filesystem event handler for the notify watcher (hot-reload).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::PoisonError;

use notify::{Event, EventKind};
use tracing::{info, warn};

use super::core::{is_catalog_file, is_hidden_below, scan_dir_recursive, FileMap, HolidayLoader};

/// Apply one watcher event to the per-file record map.
///
/// Only paths at or below `root` without a dot-prefixed component are
/// considered. A directory that appears is rescanned; a path that is gone
/// drops every file recorded under it. Returns `true` when the map changed.
pub(super) fn handle_fs_event(event: &Event, files: &FileMap, root: &Path) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }

    let mut changed = false;
    for path in &event.paths {
        if !path.starts_with(root) || is_hidden_below(path, root) {
            continue;
        }

        // Renames arrive as modify events for both the old and new path;
        // whichever one no longer exists is treated as a removal.
        if path.is_dir() {
            changed |= rescan(path, files);
        } else if path.is_file() {
            if is_catalog_file(path) {
                changed |= reload(path, files);
            }
        } else {
            changed |= remove_under(path, files);
        }
    }

    changed
}

/// Reload every catalog file below `dir`.
///
/// Files that vanished are dropped; files that fail to parse keep their
/// previous records.
fn rescan(dir: &Path, files: &FileMap) -> bool {
    let mut loaded = BTreeMap::new();
    let mut results = Vec::new();
    if let Err(e) = scan_dir_recursive(dir, &mut loaded, &mut results) {
        warn!(path = %dir.display(), error = %e, "failed to rescan directory during hot-reload");
        return false;
    }

    let mut map = files.write().unwrap_or_else(PoisonError::into_inner);
    let before = map.len();
    map.retain(|path, _| !path.starts_with(dir) || path.is_file());
    let mut changed = map.len() != before;

    for (path, records) in loaded {
        if map.get(&path) != Some(&records) {
            info!(path = %path.display(), records = records.len(), "hot-reloaded holiday catalog");
            map.insert(path, records);
            changed = true;
        }
    }
    changed
}

fn reload(path: &Path, files: &FileMap) -> bool {
    match HolidayLoader::load_file(path) {
        Ok(parsed) => {
            info!(
                path = %path.display(),
                records = parsed.records.len(),
                rejected = parsed.rejected.len(),
                "hot-reloaded holiday catalog"
            );
            files
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(path.to_path_buf(), parsed.records);
            true
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to parse catalog during hot-reload, keeping previous version"
            );
            false
        }
    }
}

/// Drop the records of `path` itself or of any file recorded below it.
fn remove_under(path: &Path, files: &FileMap) -> bool {
    let mut map = files.write().unwrap_or_else(PoisonError::into_inner);
    let before = map.len();
    map.retain(|key, _| !key.starts_with(path));
    let removed = before - map.len();
    if removed > 0 {
        info!(path = %path.display(), files = removed, "removed catalog after deletion or move");
    }
    removed > 0
}
