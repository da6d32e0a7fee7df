//! Core [`HolidayLoader`] struct: filesystem-backed catalog loading with optional hot-reload.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::normalize::normalize;
use crate::schema::{Holiday, RawHoliday};
use crate::validation::{validate_records, ValidationResult};

use super::error::{HolidayError, LoadResult, LoadStatus, Result};
use super::parse::{parse_catalog, CatalogFormat, ParsedCatalog};
use super::watcher::handle_fs_event;

/// Raw records per catalog file, ordered by path.
pub(super) type FileMap = Arc<RwLock<BTreeMap<PathBuf, Vec<RawHoliday>>>>;

/// Filesystem-backed catalog loader with optional hot-reload.
///
/// The root may be a single catalog file or a directory that is scanned
/// recursively for `*.yml`, `*.yaml` and `*.json` files. Raw records are kept
/// per file; [`catalog`](HolidayLoader::catalog) normalizes the union on demand,
/// so the matcher always sees a fresh snapshot.
pub struct HolidayLoader {
    root: PathBuf,
    pub(super) files: FileMap,
    /// Bumped on every successful (re)load.
    generation: Arc<AtomicU64>,
    /// Active filesystem watcher (held to keep it alive).
    _watcher: Option<RecommendedWatcher>,
}

impl HolidayLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Arc::new(RwLock::new(BTreeMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
            _watcher: None,
        }
    }

    /// Load every catalog file under the root, replacing anything loaded before.
    ///
    /// Dotfiles and unsupported extensions inside a directory are skipped.
    /// Parse errors are reported per file and do not abort the scan.
    pub fn load_all(&self) -> Result<Vec<LoadResult>> {
        // Canonical keys line up with the paths the watcher reports.
        let root = self.canonical_root()?;

        let mut loaded = BTreeMap::new();
        let mut results = Vec::new();
        if root.is_dir() {
            scan_dir_recursive(&root, &mut loaded, &mut results)?;
        } else {
            load_into(&root, &mut loaded, &mut results);
        }

        *self.files.write().unwrap_or_else(PoisonError::into_inner) = loaded;
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(results)
    }

    /// Read and decode one catalog file.
    pub fn load_file(path: &Path) -> Result<ParsedCatalog> {
        let format = CatalogFormat::from_path(path).ok_or_else(|| {
            HolidayError::Validation(format!(
                "unsupported catalog extension for {}, expected .yml, .yaml or .json",
                path.display()
            ))
        })?;
        let contents = fs::read_to_string(path)?;
        parse_catalog(&contents, format)
    }

    /// All raw records, files in path order, records in file order.
    pub fn records(&self) -> Vec<RawHoliday> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .flatten()
            .cloned()
            .collect()
    }

    /// The normalized catalog.
    pub fn catalog(&self) -> Vec<Holiday> {
        normalize(&self.records())
    }

    /// Diagnostics for the merged catalog.
    ///
    /// Paths index into [`records`](HolidayLoader::records).
    pub fn validate(&self) -> ValidationResult {
        validate_records(&self.records())
    }

    /// Number of catalog files currently loaded.
    pub fn file_count(&self) -> usize {
        self.files.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Counter that changes whenever the loaded records change.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn canonical_root(&self) -> Result<PathBuf> {
        fs::canonicalize(&self.root).map_err(|e| {
            HolidayError::Io(io::Error::new(
                e.kind(),
                format!("catalog path {}: {e}", self.root.display()),
            ))
        })
    }

    /// Start a filesystem watcher on the root.
    ///
    /// On create/modify the file is re-parsed and replaced; on delete its
    /// records are dropped. Parse errors are logged as warnings and the
    /// previous version is kept.
    pub fn watch(&mut self) -> Result<()> {
        let root = self.canonical_root()?;
        let files = Arc::clone(&self.files);
        let generation = Arc::clone(&self.generation);
        let scope = root.clone();

        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    if handle_fs_event(&event, &files, &scope) {
                        generation.fetch_add(1, Ordering::SeqCst);
                    }
                }
                Err(e) => warn!(error = %e, "filesystem watcher error"),
            },
        )?;

        // A single-file catalog is watched through its directory so that
        // editors replacing the file by rename are still seen.
        match root.parent() {
            Some(parent) if root.is_file() => watcher.watch(parent, RecursiveMode::NonRecursive)?,
            _ => watcher.watch(&root, RecursiveMode::Recursive)?,
        }

        info!(path = %root.display(), "watching holiday catalog for changes");
        self._watcher = Some(watcher);
        Ok(())
    }
}

/// `true` when any component of `path` below `root` starts with a dot.
pub(super) fn is_hidden_below(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root).map_or(false, |relative| {
        relative
            .components()
            .any(|c| c.as_os_str().to_str().map_or(false, |n| n.starts_with('.')))
    })
}

/// `true` for the files a directory scan or the watcher should read.
pub(super) fn is_catalog_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with('.'));
    !hidden && CatalogFormat::from_path(path).is_some()
}

pub(super) fn scan_dir_recursive(
    dir: &Path,
    loaded: &mut BTreeMap<PathBuf, Vec<RawHoliday>>,
    results: &mut Vec<LoadResult>,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "failed to read directory");
            return Ok(());
        }
    };

    for entry in entries {
        let path = entry?.path();

        // Skip dotfiles/dotdirs
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                if path.is_file() {
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Skipped {
                            reason: "dotfile".to_string(),
                        },
                    });
                }
                continue;
            }
        }

        if path.is_dir() {
            scan_dir_recursive(&path, loaded, results)?;
            continue;
        }

        if !is_catalog_file(&path) {
            results.push(LoadResult {
                path,
                status: LoadStatus::Skipped {
                    reason: "not a YAML or JSON file".to_string(),
                },
            });
            continue;
        }

        load_into(&path, loaded, results);
    }

    Ok(())
}

fn load_into(
    path: &Path,
    loaded: &mut BTreeMap<PathBuf, Vec<RawHoliday>>,
    results: &mut Vec<LoadResult>,
) {
    match HolidayLoader::load_file(path) {
        Ok(parsed) => {
            let records = parsed.records.len();
            let rejected = parsed.rejected.len();
            info!(path = %path.display(), records, rejected, "loaded holiday catalog");
            loaded.insert(path.to_path_buf(), parsed.records);
            results.push(LoadResult {
                path: path.to_path_buf(),
                status: LoadStatus::Loaded { records, rejected },
            });
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load catalog file");
            results.push(LoadResult {
                path: path.to_path_buf(),
                status: LoadStatus::Failed {
                    error: e.to_string(),
                },
            });
        }
    }
}
