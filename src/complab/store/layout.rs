use crate::error::{ComplabError, Result};
use crate::model::META_FILENAME;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves where shards and entries live under the store root.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root (and parents) if it is missing. Idempotent.
    pub fn ensure_root(&self) -> Result<&Path> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ComplabError::Io)?;
        }
        Ok(&self.root)
    }

    pub fn shard_path(&self, framework: &str) -> PathBuf {
        self.root.join(framework)
    }

    pub fn entry_path(&self, framework: &str, id: &str) -> PathBuf {
        self.shard_path(framework).join(id)
    }

    pub fn meta_path(entry_dir: &Path) -> PathBuf {
        entry_dir.join(META_FILENAME)
    }
}

/// Checks that a shard or entry name can be used as one directory name.
pub fn validate_segment(kind: &str, segment: &str) -> Result<()> {
    let bad = segment.is_empty()
        || segment.starts_with('.')
        || segment.contains('/')
        || segment.contains('\\')
        || segment.contains('\0');
    if bad {
        return Err(ComplabError::Invalid(format!(
            "{} '{}' cannot be used as a directory name",
            kind, segment
        )));
    }
    Ok(())
}

/// Checks that a source file name stays inside its entry directory.
pub fn validate_file_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let escapes = name.is_empty()
        || path.is_absolute()
        || name.starts_with('/')
        || name.starts_with('\\')
        || path
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)));
    if escapes {
        return Err(ComplabError::Invalid(format!(
            "file name '{}' must be a relative path inside the component",
            name
        )));
    }
    if name == META_FILENAME {
        return Err(ComplabError::Invalid(format!(
            "'{}' is reserved for component metadata",
            META_FILENAME
        )));
    }
    Ok(())
}

/// Whether two paths name the same directory on disk. A case-insensitive
/// filesystem or a symlinked shard can spell one entry two ways.
pub fn same_directory(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
