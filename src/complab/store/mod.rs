//! # Storage Layer
//!
//! The store is a two-level directory tree and nothing else: there is no index
//! file and no cache, every operation re-reads the disk.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! └── <framework>/            # shard
//!     └── <id>/               # entry
//!         ├── meta.json       # ComponentMeta, pretty-printed
//!         ├── index.jsx       # source files, may be nested
//!         └── styles/button.css
//! ```
//!
//! ## Self-Healing
//!
//! An entry directory is valid iff it holds a `meta.json` that parses. Anything
//! else is an orphan: [`scanner::scan`] reports it and [`scanner::reconcile`]
//! deletes it. Orphans are never surfaced as errors.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store over [`layout`], [`scanner`] and [`repository`].
//! - [`memory::InMemoryStore`]: same contract without touching the filesystem, for
//!   command tests.
//!
//! ## Concurrency
//!
//! No locking. Two saves of the same id race and the last writer wins; each
//! save on its own always leaves a complete entry behind (see
//! [`repository::persist`]).

use crate::error::Result;
use crate::model::{Component, ComponentMeta, SourceFiles, StoredEntry};
use std::path::{Path, PathBuf};

pub mod fs;
pub mod layout;
pub mod memory;
pub mod repository;
pub mod scanner;

pub use scanner::{EntryLocation, Orphan, OrphanReason, ScanReport};

/// Abstract interface for component storage.
pub trait DataStore {
    /// Classify every entry. Must not modify anything.
    fn scan(&self) -> ScanReport;

    /// Delete the given orphans. Returns how many are gone afterwards.
    fn reconcile(&mut self, orphans: &[Orphan]) -> usize;

    /// First valid entry whose metadata id matches
    fn find(&self, id: &str) -> Result<StoredEntry>;

    /// Like `find`, but also matches an orphan by directory name
    fn locate_for_removal(&self, id: &str) -> Result<EntryLocation>;

    /// Metadata plus source files for an entry
    fn load(&self, entry: &StoredEntry) -> Result<Component>;

    /// Write an entry in full (create or replace) and return its path
    fn persist(&mut self, meta: &ComponentMeta, files: &SourceFiles) -> Result<PathBuf>;

    /// Delete an entry directory
    fn remove(&mut self, location: &EntryLocation) -> Result<()>;

    /// Whether two entry paths refer to the same stored entry
    fn same_entry(&self, a: &Path, b: &Path) -> bool;
}
