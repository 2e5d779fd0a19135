// src/fs/mock.rs

use super::{DirEntry, EntryKind, FileMeta, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { content: Vec<u8>, modified: SystemTime },
    Dir,
    /// A directory whose listing fails, like one without read permission.
    DeniedDir,
    Symlink,
    /// Listed by its parent but gone by the time it is inspected.
    Vanishing,
}

#[derive(Debug, Default)]
struct MockState {
    entries: BTreeMap<PathBuf, MockEntry>,
    /// Seconds since the epoch handed out as the next modification time.
    tick: u64,
}

/// In-memory filesystem for deterministic snapshot tests.
///
/// Every write advances a virtual clock by one second, so each write gets a
/// distinct modification time without sleeping.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        Self::ensure_dir(&mut state, path.as_ref());
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(&mut state, parent);
        }
        state.tick += 1;
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(state.tick);
        state.entries.insert(
            path.to_path_buf(),
            MockEntry::File {
                content: content.into(),
                modified,
            },
        );
    }

    /// Replace a file's content (creating it if needed).
    pub fn write(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.add_file(path, content);
    }

    /// Bump a file's modification time without changing its content.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        state.tick += 1;
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(state.tick);
        if let Some(MockEntry::File { modified, .. }) = state.entries.get_mut(path.as_ref()) {
            *modified = now;
        }
    }

    /// Remove an entry and everything below it.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.state.lock().unwrap();
        state.entries.retain(|p, _| !p.starts_with(path));
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>) {
        self.insert_special(path.as_ref(), MockEntry::Symlink);
    }

    pub fn add_denied_dir(&self, path: impl AsRef<Path>) {
        self.insert_special(path.as_ref(), MockEntry::DeniedDir);
    }

    pub fn add_vanishing(&self, path: impl AsRef<Path>) {
        self.insert_special(path.as_ref(), MockEntry::Vanishing);
    }

    fn insert_special(&self, path: &Path, entry: MockEntry) {
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(&mut state, parent);
        }
        state.entries.insert(path.to_path_buf(), entry);
    }

    fn ensure_dir(state: &mut MockState, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            state
                .entries
                .entry(ancestor.to_path_buf())
                .or_insert(MockEntry::Dir);
        }
    }

    fn entry(&self, path: &Path) -> Option<MockEntry> {
        let state = self.state.lock().unwrap();
        state.entries.get(path).cloned()
    }
}

impl FileSystem for MockFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let state = self.state.lock().unwrap();
        match state.entries.get(path) {
            Some(MockEntry::Dir) => {}
            Some(MockEntry::DeniedDir) => return Err(anyhow!("Permission denied: {:?}", path)),
            _ => return Err(anyhow!("Not a directory or not found: {:?}", path)),
        }

        let children = state
            .entries
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, entry)| DirEntry {
                path: p.clone(),
                kind: match entry {
                    MockEntry::File { .. } | MockEntry::Vanishing => EntryKind::File,
                    MockEntry::Dir | MockEntry::DeniedDir => EntryKind::Dir,
                    MockEntry::Symlink => EntryKind::Symlink,
                },
            })
            .collect();
        Ok(children)
    }

    fn metadata(&self, path: &Path) -> Result<FileMeta> {
        match self.entry(path) {
            Some(MockEntry::File { content, modified }) => Ok(FileMeta {
                modified,
                len: content.len() as u64,
            }),
            Some(MockEntry::Vanishing) | None => Err(anyhow!("File not found: {:?}", path)),
            Some(_) => Err(anyhow!("Not a file: {:?}", path)),
        }
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        match self.entry(path) {
            Some(MockEntry::File { content, .. }) => Ok(Box::new(Cursor::new(content))),
            Some(MockEntry::Vanishing) | None => Err(anyhow!("File not found: {:?}", path)),
            Some(_) => Err(anyhow!("Not a file: {:?}", path)),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(
            self.entry(path),
            Some(MockEntry::Dir) | Some(MockEntry::DeniedDir)
        )
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        // In mock, we just return the path as is, assuming absolute paths are used in tests
        if self.entry(path).is_some() {
            Ok(path.to_path_buf())
        } else {
            Err(anyhow!("No such file or directory: {:?}", path))
        }
    }
}
