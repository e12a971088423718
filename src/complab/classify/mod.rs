//! # Import Classifier
//!
//! Turns raw user input into a normalized [`Component`] ready to be persisted.
//!
//! Three kinds of input are understood:
//!
//! - **folder**: a rooted tree of files, named by their path relative to the folder
//! - **files**: a flat selection of files, marked as a partial import
//! - **snippet**: one blob of code plus a language tag
//!
//! For folders and files the framework and main file are inferred by the
//! ordered rule tables in [`rules`]. Anything the caller puts in
//! [`ImportOverrides`] wins over inference.
//!
//! Classification is pure: it reads nothing from disk (see [`intake`] for that)
//! and writes nothing.

pub mod intake;
pub mod rules;

use crate::error::ComplabError;
use crate::model::{derive_id, is_previewable, normalize_tags, Component, ComponentMeta, SourceFiles};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_FILES_NAME: &str = "imported-component";
pub const DEFAULT_SNIPPET_NAME: &str = "snippet";
pub const DEFAULT_PLATFORM: &str = "Web";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// Relative name, `/`-separated.
    pub name: String,
    pub content: String,
    /// Explicitly marked as the entry point by whoever gathered the files.
    pub primary: bool,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            primary: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Folder,
    Files,
    Snippet,
}

impl FromStr for ImportKind {
    type Err = ComplabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "folder" => Ok(ImportKind::Folder),
            "files" => Ok(ImportKind::Files),
            "snippet" => Ok(ImportKind::Snippet),
            _ => Err(ComplabError::UnsupportedKind(s.to_string())),
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportKind::Folder => "folder",
            ImportKind::Files => "files",
            ImportKind::Snippet => "snippet",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportPayload {
    Folder { name: String, files: Vec<ImportFile> },
    Files(Vec<ImportFile>),
    Snippet { code: String, language: Option<String> },
}

impl ImportPayload {
    pub fn kind(&self) -> ImportKind {
        match self {
            ImportPayload::Folder { .. } => ImportKind::Folder,
            ImportPayload::Files(_) => ImportKind::Files,
            ImportPayload::Snippet { .. } => ImportKind::Snippet,
        }
    }
}

/// User-supplied values that take precedence over anything inferred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOverrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub framework: Option<String>,
    pub platform: Option<String>,
    pub language: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub main_file: Option<String>,
    pub tags: Vec<String>,
    pub external_styles: Vec<String>,
    /// Overwrite an existing component with the same id instead of refusing.
    pub replace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub payload: ImportPayload,
    pub overrides: ImportOverrides,
}

impl ImportRequest {
    pub fn new(payload: ImportPayload) -> Self {
        Self {
            payload,
            overrides: ImportOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: ImportOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn kind(&self) -> ImportKind {
        self.payload.kind()
    }
}

/// Fallbacks that come from configuration rather than the request.
#[derive(Debug, Clone)]
pub struct ClassifyDefaults {
    pub platform: String,
}

impl Default for ClassifyDefaults {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

/// Name, framework and files resolved for one kind of input, before overrides
/// other than the name are applied.
struct Draft {
    name: String,
    framework: String,
    main_file: String,
    language: Option<String>,
    files: Vec<ImportFile>,
    partial_import: bool,
    snippet: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn draft(payload: &ImportPayload, overrides: &ImportOverrides) -> Draft {
    match payload {
        ImportPayload::Folder { name, files } => Draft {
            name: non_empty(&overrides.name).unwrap_or(name).to_string(),
            framework: rules::detect_framework(files).to_string(),
            main_file: rules::detect_main_file(files),
            language: None,
            files: files.clone(),
            partial_import: false,
            snippet: false,
        },
        ImportPayload::Files(files) => Draft {
            name: non_empty(&overrides.name)
                .unwrap_or(DEFAULT_FILES_NAME)
                .to_string(),
            framework: rules::detect_framework(files).to_string(),
            main_file: rules::detect_main_file(files),
            language: None,
            files: files.clone(),
            partial_import: true,
            snippet: false,
        },
        ImportPayload::Snippet { code, language } => {
            let name = non_empty(&overrides.name)
                .unwrap_or(DEFAULT_SNIPPET_NAME)
                .to_string();
            let file_name = format!(
                "{}.{}",
                name,
                rules::snippet_extension(language.as_deref())
            );
            let tag = non_empty(language)
                .map(rules::canonical_tag)
                .unwrap_or_else(|| rules::DEFAULT_LANGUAGE.to_string());
            let mut file = ImportFile::new(file_name.clone(), code.clone());
            file.primary = true;
            Draft {
                name,
                framework: tag.clone(),
                main_file: file_name,
                language: Some(tag),
                files: vec![file],
                partial_import: false,
                snippet: true,
            }
        }
    }
}

/// Collapses the file list into a map, keeping first-seen order for names.
/// A repeated name keeps the content of its last occurrence.
fn collect_files(files: &[ImportFile]) -> (Vec<String>, SourceFiles) {
    let mut order = Vec::new();
    let mut map = SourceFiles::new();
    for file in files {
        if map.insert(file.name.clone(), file.content.clone()).is_none() {
            order.push(file.name.clone());
        } else {
            tracing::warn!("duplicate file name in import: {}", file.name);
        }
    }
    (order, map)
}

/// Builds the component an import request describes.
pub fn classify(request: &ImportRequest, defaults: &ClassifyDefaults) -> Component {
    let overrides = &request.overrides;
    let draft = draft(&request.payload, overrides);

    let framework = non_empty(&overrides.framework)
        .map(str::to_string)
        .unwrap_or(draft.framework);
    let main_file = non_empty(&overrides.main_file)
        .map(str::to_string)
        .unwrap_or(draft.main_file);
    let language = non_empty(&overrides.language)
        .map(str::to_string)
        .or(draft.language)
        .or_else(|| rules::language_for_file(&main_file).map(str::to_string))
        .unwrap_or_else(|| rules::DEFAULT_LANGUAGE.to_string());

    let (source_files, files) = collect_files(&draft.files);

    let mut meta = ComponentMeta::new(draft.name, framework);
    meta.id = derive_id(&meta.name);
    meta.description = overrides.description.clone().unwrap_or_default();
    meta.platform = non_empty(&overrides.platform)
        .unwrap_or(&defaults.platform)
        .to_string();
    meta.language = language;
    if let Some(version) = non_empty(&overrides.version) {
        meta.version = version.to_string();
    }
    meta.author = overrides.author.clone().unwrap_or_default();
    meta.tags = normalize_tags(&overrides.tags);
    meta.source_files = source_files;
    meta.main_file = main_file;
    meta.external_styles = overrides.external_styles.clone();
    meta.partial_import = draft.partial_import;
    meta.snippet = draft.snippet;
    meta.previewable = is_previewable(&meta.framework);

    Component::new(meta, files)
}
