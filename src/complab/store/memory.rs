use super::layout::{validate_file_name, validate_segment};
use super::repository::unreadable_placeholder;
use super::scanner::{EntryLocation, Orphan, OrphanReason, ScanReport};
use super::DataStore;
use crate::error::{ComplabError, Result};
use crate::model::{Component, ComponentMeta, SourceFiles, StoredEntry};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const VIRTUAL_ROOT: &str = "/mem";

#[derive(Debug, Clone)]
struct MemEntry {
    /// `None` models a directory whose metadata is missing or corrupt.
    meta: Option<ComponentMeta>,
    files: SourceFiles,
}

/// Keyed by (shard, directory name), iterated in sorted order like the
/// filesystem scanner.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: BTreeMap<(String, String), MemEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory without valid metadata.
    pub fn insert_orphan(&mut self, shard: &str, dir_name: &str) {
        self.entries.insert(
            (shard.to_string(), dir_name.to_string()),
            MemEntry {
                meta: None,
                files: SourceFiles::new(),
            },
        );
    }

    /// Drops a stored file while leaving it listed in the metadata.
    pub fn lose_file(&mut self, id: &str, file_name: &str) {
        for entry in self.entries.values_mut() {
            if entry.meta.as_ref().map(|m| m.id.as_str()) == Some(id) {
                entry.files.remove(file_name);
            }
        }
    }

    pub fn contains_dir(&self, shard: &str, dir_name: &str) -> bool {
        self.entries
            .contains_key(&(shard.to_string(), dir_name.to_string()))
    }

    fn virtual_path(shard: &str, dir_name: &str) -> PathBuf {
        PathBuf::from(VIRTUAL_ROOT).join(shard).join(dir_name)
    }

    fn location(shard: &str, dir_name: &str) -> EntryLocation {
        EntryLocation {
            shard: shard.to_string(),
            dir_name: dir_name.to_string(),
            path: Self::virtual_path(shard, dir_name),
        }
    }
}

impl DataStore for InMemoryStore {
    fn scan(&self) -> ScanReport {
        let mut report = ScanReport::default();
        for ((shard, dir_name), entry) in &self.entries {
            match &entry.meta {
                Some(meta) => report.entries.push(StoredEntry {
                    meta: meta.clone(),
                    shard: shard.clone(),
                    path: Self::virtual_path(shard, dir_name),
                }),
                None => report.orphans.push(Orphan {
                    location: Self::location(shard, dir_name),
                    reason: OrphanReason::MissingMeta,
                }),
            }
        }
        report
    }

    fn reconcile(&mut self, orphans: &[Orphan]) -> usize {
        for orphan in orphans {
            self.entries.remove(&(
                orphan.location.shard.clone(),
                orphan.location.dir_name.clone(),
            ));
        }
        orphans.len()
    }

    fn find(&self, id: &str) -> Result<StoredEntry> {
        self.scan()
            .entries
            .into_iter()
            .find(|e| e.meta.id == id)
            .ok_or_else(|| ComplabError::NotFound(id.to_string()))
    }

    fn locate_for_removal(&self, id: &str) -> Result<EntryLocation> {
        self.entries
            .iter()
            .find(|((_, dir_name), entry)| match &entry.meta {
                Some(meta) => meta.id == id,
                None => dir_name == id,
            })
            .map(|((shard, dir_name), _)| Self::location(shard, dir_name))
            .ok_or_else(|| ComplabError::NotFound(id.to_string()))
    }

    fn load(&self, entry: &StoredEntry) -> Result<Component> {
        let dir_name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stored = self
            .entries
            .get(&(entry.shard.clone(), dir_name))
            .ok_or_else(|| ComplabError::NotFound(entry.meta.id.clone()))?;
        let meta = stored
            .meta
            .clone()
            .ok_or_else(|| ComplabError::Store(format!("{} has no metadata", entry.meta.id)))?;

        let files = meta
            .source_files
            .iter()
            .map(|name| {
                let content = stored
                    .files
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| unreadable_placeholder(name));
                (name.clone(), content)
            })
            .collect();

        Ok(Component::new(meta, files))
    }

    fn persist(&mut self, meta: &ComponentMeta, files: &SourceFiles) -> Result<PathBuf> {
        validate_segment("framework", &meta.framework)?;
        validate_segment("id", &meta.id)?;
        for name in files.keys() {
            validate_file_name(name)?;
        }
        self.entries.insert(
            (meta.framework.clone(), meta.id.clone()),
            MemEntry {
                meta: Some(meta.clone()),
                files: files.clone(),
            },
        );
        Ok(Self::virtual_path(&meta.framework, &meta.id))
    }

    fn remove(&mut self, location: &EntryLocation) -> Result<()> {
        self.entries
            .remove(&(location.shard.clone(), location.dir_name.clone()));
        Ok(())
    }

    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        a == b
    }
}
