//! Tests for the catalog loader module.

use std::fs;

use chrono::NaiveDate;
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};
use tempfile::TempDir;

use super::*;
use crate::matcher::select_active;

const NEW_YEAR_YAML: &str = r#"
- id: new-year
  date: { type: single, month: 1, day: 1 }
- id: broken
  date: { type: single, month: 13, day: 1 }
"#;

const WINTER_JSON: &str = r#"{
  "holidays": [
    {
      "id": "winter-break",
      "priority": 1,
      "range": { "start": { "month": 12, "day": 20 }, "end": { "month": 1, "day": 5 } }
    }
  ]
}"#;

fn temp_loader() -> (TempDir, HolidayLoader) {
    let dir = TempDir::new().expect("create tempdir");
    let loader = HolidayLoader::new(dir.path());
    (dir, loader)
}

fn loaded_count(results: &[LoadResult]) -> usize {
    results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Loaded { .. }))
        .count()
}

#[test]
fn load_single_file_root() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("holidays.yml");
    fs::write(&path, NEW_YEAR_YAML).unwrap();

    let loader = HolidayLoader::new(&path);
    assert_eq!(loader.root(), path.as_path());
    let results = loader.load_all().unwrap();
    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0].status,
        LoadStatus::Loaded { records: 2, rejected: 0 }
    ));

    assert_eq!(loader.records().len(), 2);
    let catalog = loader.catalog();
    assert_eq!(catalog.len(), 1, "invalid record is normalized away");
    assert_eq!(catalog[0].id, "new-year");
}

#[test]
fn load_all_skips_dotfiles_and_other_extensions() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("a.yml"), NEW_YEAR_YAML).unwrap();
    fs::write(dir.path().join("b.json"), WINTER_JSON).unwrap();
    fs::write(dir.path().join(".hidden.yml"), NEW_YEAR_YAML).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a catalog").unwrap();

    let results = loader.load_all().unwrap();
    let skipped = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Skipped { .. }))
        .count();
    assert_eq!(loaded_count(&results), 2);
    assert_eq!(skipped, 2);
    assert_eq!(loader.file_count(), 2);

    let ids: Vec<String> = loader.catalog().into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["new-year", "winter-break"], "files merge in path order");
}

#[test]
fn load_all_recurses_into_subdirectories() {
    let (dir, loader) = temp_loader();
    let sub = dir.path().join("regional");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("winter.json"), WINTER_JSON).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_count(&results), 1);
    assert_eq!(loader.catalog()[0].id, "winter-break");
}

#[test]
fn broken_file_does_not_abort_scan() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("good.yml"), NEW_YEAR_YAML).unwrap();
    fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

    let results = loader.load_all().unwrap();
    let failed = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Failed { .. }))
        .count();
    assert_eq!(failed, 1);
    assert_eq!(loaded_count(&results), 1);
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let loader = HolidayLoader::new(dir.path().join("nope"));
    let err = loader.load_all().unwrap_err();
    assert!(matches!(err, HolidayError::Io(_)));
}

#[test]
fn reload_replaces_previous_contents() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("a.yml");
    fs::write(&path, NEW_YEAR_YAML).unwrap();
    loader.load_all().unwrap();
    let first = loader.generation();

    fs::remove_file(&path).unwrap();
    fs::write(dir.path().join("b.json"), WINTER_JSON).unwrap();
    loader.load_all().unwrap();

    assert!(loader.generation() > first);
    let ids: Vec<String> = loader.catalog().into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["winter-break"]);
}

#[test]
fn validate_reports_dropped_records() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("a.yml"), NEW_YEAR_YAML).unwrap();
    loader.load_all().unwrap();

    let report = loader.validate();
    assert!(!report.valid);
    assert_eq!(report.errors[0].path, "holidays[1]");
}

#[test]
fn loaded_catalog_feeds_the_matcher() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("a.yml"), NEW_YEAR_YAML).unwrap();
    fs::write(dir.path().join("b.json"), WINTER_JSON).unwrap();
    loader.load_all().unwrap();

    let catalog = loader.catalog();
    let new_years_day = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    // Both match; winter-break has the higher priority.
    let winner = select_active(&catalog, new_years_day).unwrap();
    assert_eq!(winner.id, "winter-break");
}

#[test]
fn fs_events_upsert_and_remove_files() {
    let (dir, loader) = temp_loader();
    loader.load_all().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    let path = root.join("live.yml");
    fs::write(&path, NEW_YEAR_YAML).unwrap();

    let created = Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone());
    assert!(super::watcher::handle_fs_event(&created, &loader.files, &root));
    assert_eq!(loader.records().len(), 2);

    // A parse failure keeps the previous version.
    fs::write(&path, "- id: [unclosed").unwrap();
    let modified = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.clone());
    assert!(!super::watcher::handle_fs_event(&modified, &loader.files, &root));
    assert_eq!(loader.records().len(), 2);

    fs::remove_file(&path).unwrap();
    let removed = Event::new(EventKind::Remove(RemoveKind::File)).add_path(path.clone());
    assert!(super::watcher::handle_fs_event(&removed, &loader.files, &root));
    assert!(loader.records().is_empty());
}

#[test]
fn fs_events_outside_scope_are_ignored() {
    let (dir, loader) = temp_loader();
    let root = fs::canonicalize(dir.path()).unwrap();
    let catalog = root.join("catalog.yml");
    let sibling = root.join("sibling.yml");
    fs::write(&catalog, NEW_YEAR_YAML).unwrap();
    fs::write(&sibling, NEW_YEAR_YAML).unwrap();

    let event = Event::new(EventKind::Create(CreateKind::File)).add_path(sibling);
    assert!(!super::watcher::handle_fs_event(&event, &loader.files, &catalog));

    let dotfile = root.join(".swap.yml");
    fs::write(&dotfile, NEW_YEAR_YAML).unwrap();
    let event = Event::new(EventKind::Create(CreateKind::File)).add_path(dotfile);
    assert!(!super::watcher::handle_fs_event(&event, &loader.files, &root));
}

#[test]
fn fs_events_for_directory_moved_out_drop_its_files() {
    let (dir, loader) = temp_loader();
    let root = fs::canonicalize(dir.path()).unwrap();
    let regional = root.join("regional");
    fs::create_dir(&regional).unwrap();
    fs::write(regional.join("winter.json"), WINTER_JSON).unwrap();
    fs::write(root.join("a.yml"), NEW_YEAR_YAML).unwrap();
    loader.load_all().unwrap();
    assert_eq!(loader.catalog().len(), 2);

    let elsewhere = TempDir::new().unwrap();
    fs::rename(&regional, elsewhere.path().join("regional")).unwrap();
    let moved = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
        .add_path(regional.clone());
    assert!(super::watcher::handle_fs_event(&moved, &loader.files, &root));

    let ids: Vec<String> = loader.catalog().into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["new-year"]);
}

#[test]
fn fs_events_for_directory_moved_in_load_its_files() {
    let (dir, loader) = temp_loader();
    let root = fs::canonicalize(dir.path()).unwrap();
    loader.load_all().unwrap();
    assert!(loader.catalog().is_empty());

    let staging = TempDir::new().unwrap();
    let nested = staging.path().join("regional").join("north");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("winter.json"), WINTER_JSON).unwrap();

    let regional = root.join("regional");
    fs::rename(staging.path().join("regional"), &regional).unwrap();
    let moved = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
        .add_path(regional.clone());
    assert!(super::watcher::handle_fs_event(&moved, &loader.files, &root));
    assert_eq!(loader.catalog()[0].id, "winter-break");
    assert_eq!(loader.file_count(), 1);

    // A second event for the unchanged directory is a no-op.
    let touched = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(regional);
    assert!(!super::watcher::handle_fs_event(&touched, &loader.files, &root));
}

#[test]
fn fs_events_inside_dot_directories_are_ignored() {
    let (dir, loader) = temp_loader();
    let root = fs::canonicalize(dir.path()).unwrap();
    let cache = root.join(".cache");
    fs::create_dir(&cache).unwrap();
    let cached = cache.join("x.yml");
    fs::write(&cached, NEW_YEAR_YAML).unwrap();

    let event = Event::new(EventKind::Create(CreateKind::File)).add_path(cached);
    assert!(!super::watcher::handle_fs_event(&event, &loader.files, &root));
    let event = Event::new(EventKind::Create(CreateKind::Folder)).add_path(cache);
    assert!(!super::watcher::handle_fs_event(&event, &loader.files, &root));
    assert!(loader.records().is_empty());

    // A full scan skips the same directory.
    loader.load_all().unwrap();
    assert!(loader.records().is_empty());
}
