//! Two-level walk over the store: shard directories, then entry directories.
//!
//! Reading and healing are separate steps. [`scan`] only classifies what it
//! finds (with [`validate_entry`]); [`reconcile`] is the one place that deletes
//! orphaned directories. `list` runs both, `get` only walks, `delete` walks with
//! a directory-name fallback for orphans.

use super::layout::StoreLayout;
use crate::error::{ComplabError, Result};
use crate::model::{ComponentMeta, StoredEntry};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrphanReason {
    MissingMeta,
    CorruptMeta(String),
    /// Hidden directory left behind by an interrupted write.
    Leftover,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Valid(Box<ComponentMeta>),
    Orphan(OrphanReason),
}

/// A directory that can be targeted for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLocation {
    pub shard: String,
    pub dir_name: String,
    pub path: PathBuf,
}

impl From<&StoredEntry> for EntryLocation {
    fn from(entry: &StoredEntry) -> Self {
        let dir_name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.meta.id.clone());
        Self {
            shard: entry.shard.clone(),
            dir_name,
            path: entry.path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan {
    pub location: EntryLocation,
    pub reason: OrphanReason,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub entries: Vec<StoredEntry>,
    pub orphans: Vec<Orphan>,
    pub skipped_shards: Vec<PathBuf>,
}

/// Decides whether an entry directory holds a parseable metadata record.
/// Never touches the filesystem beyond reading.
pub fn validate_entry(entry_dir: &Path) -> EntryState {
    let is_hidden = entry_dir
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false);
    if is_hidden {
        return EntryState::Orphan(OrphanReason::Leftover);
    }

    let meta_path = StoreLayout::meta_path(entry_dir);
    let raw = match fs::read_to_string(&meta_path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return EntryState::Orphan(OrphanReason::MissingMeta)
        }
        Err(e) => return EntryState::Orphan(OrphanReason::CorruptMeta(e.to_string())),
    };

    match serde_json::from_str::<ComponentMeta>(&raw) {
        Ok(meta) => EntryState::Valid(Box::new(meta)),
        Err(e) => EntryState::Orphan(OrphanReason::CorruptMeta(e.to_string())),
    }
}

/// Sorted subdirectories of `dir`, as (name, path).
fn subdirs(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut dirs: Vec<(String, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some((name, path))
        })
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Shards under the root. Hidden directories at the root are not ours and are ignored.
fn shards(layout: &StoreLayout) -> std::io::Result<Vec<(String, PathBuf)>> {
    let root = layout.ensure_root().map_err(|e| match e {
        ComplabError::Io(io) => io,
        other => std::io::Error::other(other.to_string()),
    })?;
    Ok(subdirs(root)?
        .into_iter()
        .filter(|(name, _)| !name.starts_with('.'))
        .collect())
}

/// Walks every shard and classifies every entry. Never fails: a root that
/// cannot be read yields an empty report, a shard that cannot be read is skipped.
pub fn scan(layout: &StoreLayout) -> ScanReport {
    let mut report = ScanReport::default();

    let shards = match shards(layout) {
        Ok(shards) => shards,
        Err(e) => {
            tracing::warn!("cannot read store root {}: {}", layout.root().display(), e);
            return report;
        }
    };

    for (shard, shard_path) in shards {
        let entries = match subdirs(&shard_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("skipping unreadable shard {}: {}", shard_path.display(), e);
                report.skipped_shards.push(shard_path);
                continue;
            }
        };

        for (dir_name, path) in entries {
            match validate_entry(&path) {
                EntryState::Valid(meta) => report.entries.push(StoredEntry {
                    meta: *meta,
                    shard: shard.clone(),
                    path,
                }),
                EntryState::Orphan(reason) => report.orphans.push(Orphan {
                    location: EntryLocation {
                        shard: shard.clone(),
                        dir_name,
                        path,
                    },
                    reason,
                }),
            }
        }
    }

    report
}

/// Deletes orphaned entry directories. Returns how many were removed.
pub fn reconcile(orphans: &[Orphan]) -> usize {
    let mut removed = 0;
    for orphan in orphans {
        let path = &orphan.location.path;
        tracing::warn!(
            "removing invalid component directory {} ({:?})",
            path.display(),
            orphan.reason
        );
        match fs::remove_dir_all(path) {
            Ok(()) => removed += 1,
            // Already gone, e.g. a concurrent delete got there first.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => removed += 1,
            Err(e) => tracing::warn!("cannot remove {}: {}", path.display(), e),
        }
    }
    removed
}

/// Finds the first valid entry whose metadata id matches. Orphans are skipped,
/// not cleaned up.
pub fn find(layout: &StoreLayout, id: &str) -> Result<StoredEntry> {
    let shards = shards(layout).map_err(ComplabError::Io)?;
    for (shard, shard_path) in shards {
        let entries = match subdirs(&shard_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("skipping unreadable shard {}: {}", shard_path.display(), e);
                continue;
            }
        };
        for (_, path) in entries {
            if let EntryState::Valid(meta) = validate_entry(&path) {
                if meta.id == id {
                    return Ok(StoredEntry {
                        meta: *meta,
                        shard,
                        path,
                    });
                }
            }
        }
    }
    Err(ComplabError::NotFound(id.to_string()))
}

/// Like [`find`], but an orphan whose directory is named after the id also
/// counts, so a component with corrupt metadata can still be deleted.
pub fn locate_for_removal(layout: &StoreLayout, id: &str) -> Result<EntryLocation> {
    let shards = shards(layout).map_err(ComplabError::Io)?;
    for (shard, shard_path) in shards {
        let entries = match subdirs(&shard_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("skipping unreadable shard {}: {}", shard_path.display(), e);
                continue;
            }
        };
        for (dir_name, path) in entries {
            let matches = match validate_entry(&path) {
                EntryState::Valid(meta) => meta.id == id,
                EntryState::Orphan(_) => dir_name == id,
            };
            if matches {
                return Ok(EntryLocation {
                    shard,
                    dir_name,
                    path,
                });
            }
        }
    }
    Err(ComplabError::NotFound(id.to_string()))
}
