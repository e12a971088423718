use super::layout::{self, StoreLayout};
use super::scanner::{self, EntryLocation, Orphan, ScanReport};
use super::{repository, DataStore};
use crate::error::Result;
use crate::model::{Component, ComponentMeta, SourceFiles, StoredEntry};
use std::path::{Path, PathBuf};

pub struct FileStore {
    layout: StoreLayout,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: StoreLayout::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }
}

impl DataStore for FileStore {
    fn scan(&self) -> ScanReport {
        scanner::scan(&self.layout)
    }

    fn reconcile(&mut self, orphans: &[Orphan]) -> usize {
        scanner::reconcile(orphans)
    }

    fn find(&self, id: &str) -> Result<StoredEntry> {
        scanner::find(&self.layout, id)
    }

    fn locate_for_removal(&self, id: &str) -> Result<EntryLocation> {
        scanner::locate_for_removal(&self.layout, id)
    }

    fn load(&self, entry: &StoredEntry) -> Result<Component> {
        repository::load(&entry.path)
    }

    fn persist(&mut self, meta: &ComponentMeta, files: &SourceFiles) -> Result<PathBuf> {
        repository::persist(&self.layout, meta, files)
    }

    fn remove(&mut self, location: &EntryLocation) -> Result<()> {
        repository::remove(&location.path)
    }

    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        layout::same_directory(a, b)
    }
}
