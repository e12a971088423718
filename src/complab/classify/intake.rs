//! Reads folders and loose files from disk into [`ImportFile`]s.

use super::{ImportFile, ImportPayload, DEFAULT_FILES_NAME};
use crate::error::{ComplabError, Result};
use crate::model::META_FILENAME;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct IntakeOptions {
    /// Extensions (with leading dot) a folder import keeps.
    pub extensions: Vec<String>,
    /// Directory names a folder import never descends into.
    pub ignored_dirs: Vec<String>,
}

impl IntakeOptions {
    fn keeps(&self, path: &Path) -> bool {
        let ext = match path.extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
            None => return false,
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }

    fn ignores(&self, dir_name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == dir_name)
    }
}

fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_entry_file(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    lower.starts_with("index.") || lower.starts_with("main.")
}

/// Walks `root` (iteratively, in sorted order) and returns a folder payload
/// named after the directory.
pub fn read_folder(root: &Path, options: &IntakeOptions) -> Result<ImportPayload> {
    if !root.is_dir() {
        return Err(ComplabError::Api(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    let name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| DEFAULT_FILES_NAME.to_string());

    let mut files = Vec::new();
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut children: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(ComplabError::Io)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        children.sort();

        let mut subdirs = Vec::new();
        for path in children {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            if path.is_dir() {
                if !options.ignores(&file_name) {
                    subdirs.push(path);
                }
                continue;
            }
            if !options.keeps(&path) {
                continue;
            }

            let rel = relative_name(root, &path);
            if rel == META_FILENAME {
                tracing::warn!("skipping {}: name is reserved", path.display());
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(content) => files.push(ImportFile {
                    name: rel,
                    content,
                    primary: is_entry_file(&file_name),
                }),
                Err(e) => tracing::warn!("skipping unreadable file {}: {}", path.display(), e),
            }
        }
        // Reverse so the stack pops subdirectories in sorted order.
        pending.extend(subdirs.into_iter().rev());
    }

    Ok(ImportPayload::Folder { name, files })
}

/// Reads each path as a loose file named by its base name. Unreadable files are
/// skipped.
pub fn read_files(paths: &[PathBuf]) -> Vec<ImportFile> {
    paths
        .iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            match fs::read_to_string(path) {
                Ok(content) => Some(ImportFile::new(name, content)),
                Err(e) => {
                    tracing::warn!("skipping unreadable file {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> IntakeOptions {
        IntakeOptions {
            extensions: vec![".js".into(), ".jsx".into(), ".css".into(), ".json".into()],
            ignored_dirs: vec!["node_modules".into(), ".git".into()],
        }
    }

    #[test]
    fn reads_tree_with_relative_names() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my-button");
        fs::create_dir_all(root.join("styles")).unwrap();
        fs::create_dir_all(root.join("node_modules").join("react")).unwrap();
        fs::write(root.join("Button.jsx"), "jsx").unwrap();
        fs::write(root.join("index.js"), "idx").unwrap();
        fs::write(root.join("styles").join("button.css"), "css").unwrap();
        fs::write(root.join("node_modules").join("react").join("index.js"), "no").unwrap();
        fs::write(root.join("photo.png"), "bin").unwrap();
        fs::write(root.join("meta.json"), "{}").unwrap();

        let payload = read_folder(&root, &options()).unwrap();
        let ImportPayload::Folder { name, files } = payload else {
            panic!("expected folder payload");
        };
        assert_eq!(name, "my-button");
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Button.jsx", "index.js", "styles/button.css"]);
        assert!(files[1].primary);
        assert!(!files[0].primary);
    }

    #[test]
    fn read_folder_rejects_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.js");
        fs::write(&file, "x").unwrap();
        assert!(read_folder(&file, &options()).is_err());
    }

    #[test]
    fn read_files_skips_missing() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.js");
        fs::write(&a, "A").unwrap();
        let files = read_files(&[a, temp.path().join("missing.js")]);
        assert_eq!(files, vec![ImportFile::new("a.js", "A")]);
    }
}
