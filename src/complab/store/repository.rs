//! Reads and writes one entry directory: its `meta.json` and its source files.

use super::layout::{validate_file_name, validate_segment, StoreLayout};
use crate::error::{ComplabError, Result};
use crate::model::{Component, ComponentMeta, SourceFiles};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Content substituted for a source file that could not be read.
pub fn unreadable_placeholder(file_name: &str) -> String {
    format!("// Error reading file {}", file_name)
}

/// Loads the metadata record and every file it lists. A file that cannot be
/// read is replaced by [`unreadable_placeholder`] instead of failing the load.
pub fn load(entry_dir: &Path) -> Result<Component> {
    let raw = fs::read_to_string(StoreLayout::meta_path(entry_dir)).map_err(ComplabError::Io)?;
    let meta: ComponentMeta = serde_json::from_str(&raw).map_err(ComplabError::Serialization)?;

    let mut files = SourceFiles::new();
    for name in &meta.source_files {
        let content = match read_source(entry_dir, name) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("cannot read {} in {}: {}", name, entry_dir.display(), e);
                unreadable_placeholder(name)
            }
        };
        files.insert(name.clone(), content);
    }

    Ok(Component::new(meta, files))
}

fn read_source(entry_dir: &Path, name: &str) -> Result<String> {
    validate_file_name(name)?;
    fs::read_to_string(entry_dir.join(name)).map_err(ComplabError::Io)
}

/// Writes the entry as a whole and returns its directory.
///
/// The new contents are staged in a hidden sibling directory and swapped in,
/// so the entry afterwards holds exactly `files` plus `meta.json`. Existing
/// contents are replaced, never merged.
pub fn persist(layout: &StoreLayout, meta: &ComponentMeta, files: &SourceFiles) -> Result<PathBuf> {
    validate_segment("framework", &meta.framework)?;
    validate_segment("id", &meta.id)?;
    for name in files.keys() {
        validate_file_name(name)?;
    }

    layout.ensure_root()?;
    let shard = layout.shard_path(&meta.framework);
    fs::create_dir_all(&shard).map_err(ComplabError::Io)?;

    let target = layout.entry_path(&meta.framework, &meta.id);
    let staging = shard.join(format!(".{}.staging-{}", meta.id, Uuid::new_v4()));

    if let Err(e) = write_entry(&staging, meta, files) {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }
    swap_into_place(&staging, &target, &meta.id)?;

    tracing::debug!("persisted {} to {}", meta.id, target.display());
    Ok(target)
}

fn write_entry(dir: &Path, meta: &ComponentMeta, files: &SourceFiles) -> Result<()> {
    fs::create_dir_all(dir).map_err(ComplabError::Io)?;
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ComplabError::Io)?;
        }
        fs::write(&path, content).map_err(ComplabError::Io)?;
    }
    let json = serde_json::to_string_pretty(meta).map_err(ComplabError::Serialization)?;
    fs::write(StoreLayout::meta_path(dir), json).map_err(ComplabError::Io)?;
    Ok(())
}

fn swap_into_place(staging: &Path, target: &Path, id: &str) -> Result<()> {
    if !target.exists() {
        if let Err(e) = fs::rename(staging, target) {
            let _ = fs::remove_dir_all(staging);
            return Err(ComplabError::Io(e));
        }
        return Ok(());
    }

    let retired = target.with_file_name(format!(".{}.retired-{}", id, Uuid::new_v4()));
    if let Err(e) = fs::rename(target, &retired) {
        let _ = fs::remove_dir_all(staging);
        return Err(ComplabError::Io(e));
    }
    if let Err(e) = fs::rename(staging, target) {
        let _ = fs::rename(&retired, target);
        let _ = fs::remove_dir_all(staging);
        return Err(ComplabError::Io(e));
    }
    if let Err(e) = fs::remove_dir_all(&retired) {
        // Hidden, so the next list() reconciles it.
        tracing::warn!("cannot remove retired copy {}: {}", retired.display(), e);
    }
    Ok(())
}

/// Recursively deletes an entry directory. A missing directory is not an error.
pub fn remove(entry_dir: &Path) -> Result<()> {
    match fs::remove_dir_all(entry_dir) {
        Ok(()) => {
            tracing::debug!("removed {}", entry_dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ComplabError::Io(e)),
    }
}
