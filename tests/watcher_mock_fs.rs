mod common;
use crate::common::{describe, init_tracing, mock_watcher, MOCK_ROOT};

use std::sync::Arc;

use pollwatch::errors::PollwatchError;
use pollwatch::fs::mock::MockFileSystem;
use pollwatch::snapshot::{compute_file_hash, Snapshotter};
use pollwatch::types::FingerprintMode;
use pollwatch::{ChangeDetector, DefaultFilter, Unfiltered, Watcher};

fn project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/src/main.rs", "fn main() {}");
    fs.add_file("/proj/src/lib.rs", "pub fn lib() {}");
    fs.add_file("/proj/README.md", "# Readme");
    fs
}

#[test]
fn denied_directory_is_skipped() {
    init_tracing();
    let fs = project();
    fs.add_denied_dir("/proj/secret");

    let mut watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);
    assert_eq!(watcher.snapshot().len(), 3);
    assert!(watcher.check().unwrap().is_empty());
}

#[test]
fn entry_vanishing_mid_walk_is_skipped() {
    init_tracing();
    let fs = project();
    fs.add_vanishing("/proj/src/tmp.rs");

    let mut watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);
    assert_eq!(watcher.snapshot().len(), 3);
    assert!(!watcher.snapshot().contains("/proj/src/tmp.rs".as_ref()));
    assert!(watcher.check().unwrap().is_empty());
}

#[test]
fn symlink_is_skipped() {
    let fs = project();
    fs.add_symlink("/proj/src/alias.rs");

    let watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);
    assert_eq!(watcher.snapshot().len(), 3);
}

#[test]
fn missing_root_is_a_config_error() {
    let fs = MockFileSystem::new();
    let err = Watcher::with_fs(
        "/nope",
        Arc::new(Unfiltered),
        Arc::new(fs),
        FingerprintMode::Metadata,
    )
    .unwrap_err();
    assert!(matches!(err, PollwatchError::ConfigError(_)), "got {err:?}");
}

#[test]
fn removed_root_fails_check() {
    let fs = project();
    let mut watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);

    fs.remove(MOCK_ROOT);
    let err = watcher.check().unwrap_err();
    assert!(matches!(err, PollwatchError::ConfigError(_)), "got {err:?}");
}

#[test]
fn add_modify_delete_in_one_check() {
    let fs = project();
    let mut watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);

    fs.add_file("/proj/src/new.rs", "// new");
    fs.write("/proj/src/lib.rs", "pub fn lib() { todo!() }");
    fs.remove("/proj/README.md");

    let changes = watcher.check().unwrap();
    assert_eq!(
        describe(&changes),
        vec![
            "deleted /proj/README.md",
            "modified /proj/src/lib.rs",
            "added /proj/src/new.rs",
        ]
    );
    assert!(watcher.check().unwrap().is_empty());
}

#[test]
fn removing_a_directory_deletes_its_files() {
    let fs = project();
    let mut watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);

    fs.remove("/proj/src");
    let changes = watcher.check().unwrap();
    assert_eq!(
        describe(&changes),
        vec!["deleted /proj/src/lib.rs", "deleted /proj/src/main.rs"]
    );
}

#[test]
fn touch_is_a_modification_in_metadata_mode() {
    let fs = project();
    let mut watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);

    fs.touch("/proj/README.md");
    assert_eq!(
        describe(&watcher.check().unwrap()),
        vec!["modified /proj/README.md"]
    );
}

#[test]
fn touch_is_not_a_modification_in_content_mode() {
    let fs = project();
    let mut watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Content);

    fs.touch("/proj/README.md");
    fs.write("/proj/src/main.rs", "fn main() {}");
    assert!(watcher.check().unwrap().is_empty());

    // Same length, different bytes.
    fs.write("/proj/README.md", "# README");
    assert_eq!(
        describe(&watcher.check().unwrap()),
        vec!["modified /proj/README.md"]
    );
}

#[test]
fn content_mode_stores_blake3_digests() {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/test.txt", "hello world");

    let watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Content);
    let fp = watcher.snapshot().get("/proj/test.txt".as_ref()).unwrap();
    // blake3 hash of "hello world"
    assert_eq!(
        fp.content.as_deref(),
        Some("d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24")
    );
    assert_eq!(fp.len, 11);
}

#[test]
fn metadata_mode_does_not_hash() {
    let fs = project();
    let watcher = mock_watcher(&fs, Arc::new(Unfiltered), FingerprintMode::Metadata);
    assert!(watcher.snapshot().iter().all(|(_, fp)| fp.content.is_none()));
}

#[test]
fn hash_of_missing_file_is_an_error() {
    let fs = MockFileSystem::new();
    assert!(compute_file_hash(&fs, "/proj/missing.txt".as_ref()).is_err());
}

#[test]
fn default_filter_prunes_directories_before_descending() {
    let fs = project();
    fs.add_file("/proj/.git/HEAD", "ref: refs/heads/main");
    fs.add_file("/proj/node_modules/dep/index.js", "module.exports = 1");
    fs.add_file("/proj/src/main.pyc", "bytecode");

    let snapshotter = Snapshotter::new(
        Arc::new(fs.clone()),
        Arc::new(DefaultFilter::new()),
        FingerprintMode::Metadata,
    );
    let snapshot = snapshotter.snapshot(MOCK_ROOT.as_ref(), None).unwrap();

    let mut paths: Vec<String> = snapshot
        .paths()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec!["/proj/README.md", "/proj/src/lib.rs", "/proj/src/main.rs"]
    );
}

#[test]
fn snapshot_of_unreadable_root_is_a_config_error() {
    let fs = MockFileSystem::new();
    fs.add_denied_dir("/locked");

    let snapshotter = Snapshotter::new(
        Arc::new(fs),
        Arc::new(Unfiltered),
        FingerprintMode::Metadata,
    );
    let err = snapshotter.snapshot("/locked".as_ref(), None).unwrap_err();
    assert!(matches!(err, PollwatchError::ConfigError(_)), "got {err:?}");
}
