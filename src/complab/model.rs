use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Name of the metadata record inside every entry directory.
pub const META_FILENAME: &str = "meta.json";

pub const DEFAULT_VERSION: &str = "1.0.0";

/// Frameworks the host application can render a live preview for.
pub const PREVIEWABLE_FRAMEWORKS: [&str; 4] = ["React", "Vue", "HTML", "JavaScript"];

/// Relative file name -> textual content.
pub type SourceFiles = BTreeMap<String, String>;

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMeta {
    pub id: String,
    pub name: String,
    pub description: String,
    pub framework: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub language: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub source_files: Vec<String>,
    #[serde(default)]
    pub main_file: String,
    #[serde(default)]
    pub external_styles: Vec<String>,
    #[serde(default)]
    pub partial_import: bool,
    #[serde(default)]
    pub snippet: bool,
    #[serde(default)]
    pub previewable: bool,
}

impl ComponentMeta {
    pub fn new(name: impl Into<String>, framework: impl Into<String>) -> Self {
        let name = name.into();
        let framework = framework.into();
        let now = Utc::now();
        Self {
            id: derive_id(&name),
            previewable: is_previewable(&framework),
            name,
            description: String::new(),
            framework,
            platform: String::new(),
            language: String::new(),
            version: default_version(),
            author: String::new(),
            tags: Vec::new(),
            created: now,
            updated: now,
            source_files: Vec::new(),
            main_file: String::new(),
            external_styles: Vec::new(),
            partial_import: false,
            snippet: false,
        }
    }
}

/// A component together with the contents of its source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub meta: ComponentMeta,
    pub files: SourceFiles,
}

impl Component {
    pub fn new(meta: ComponentMeta, files: SourceFiles) -> Self {
        Self { meta, files }
    }
}

/// A metadata record as found on disk, with the shard and directory it lives in.
///
/// `shard` is the name of the directory the entry was found under, which is
/// what lookups and removals go by even if `meta.framework` was edited by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub meta: ComponentMeta,
    pub shard: String,
    pub path: PathBuf,
}

/// Lowercases the name and strips everything outside `[a-z0-9]`.
///
/// Lossy on purpose: "My Card!" and "my-card" both become "mycard".
pub fn derive_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub fn is_previewable(framework: &str) -> bool {
    PREVIEWABLE_FRAMEWORKS.contains(&framework)
}

/// Trims tags, drops empty ones and keeps only the first occurrence of each.
pub fn normalize_tags<I, T>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
