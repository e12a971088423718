//! Ordered rule tables used by the classifier.
//!
//! Each table is evaluated top to bottom and the first matching rule wins, so
//! the order of the entries *is* the precedence.

use super::ImportFile;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

pub const DEFAULT_FRAMEWORK: &str = "HTML";
pub const DEFAULT_LANGUAGE: &str = "JavaScript";
pub const DEFAULT_SNIPPET_EXTENSION: &str = "js";

/// What the framework rules look at: every file extension in the input and the
/// concatenated text of all files.
#[derive(Debug, Default)]
pub struct Evidence {
    extensions: BTreeSet<String>,
    text: String,
}

impl Evidence {
    pub fn from_files(files: &[ImportFile]) -> Self {
        let extensions = files
            .iter()
            .filter_map(|f| extension_of(&f.name))
            .collect();
        let text = files
            .iter()
            .map(|f| f.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { extensions, text }
    }

    pub fn has_ext(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }

    pub fn mentions(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }
}

/// Lowercased extension without the dot, taken from the base name.
pub fn extension_of(name: &str) -> Option<String> {
    let base = base_name(name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

pub fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name)
}

pub struct FrameworkRule {
    pub framework: &'static str,
    pub matches: fn(&Evidence) -> bool,
}

fn is_react(e: &Evidence) -> bool {
    e.has_ext("jsx") || e.has_ext("tsx") || e.mentions("import React")
}

fn is_vue(e: &Evidence) -> bool {
    e.has_ext("vue") || e.mentions("<template>")
}

fn is_angular(e: &Evidence) -> bool {
    e.mentions("@Component") || e.mentions("angular")
}

fn is_svelte(e: &Evidence) -> bool {
    e.has_ext("svelte")
}

fn is_flutter(e: &Evidence) -> bool {
    e.has_ext("dart")
}

fn is_html(e: &Evidence) -> bool {
    e.has_ext("html")
}

fn is_plain_script(e: &Evidence) -> bool {
    e.has_ext("js") || e.has_ext("ts")
}

pub const FRAMEWORK_RULES: &[FrameworkRule] = &[
    FrameworkRule { framework: "React", matches: is_react },
    FrameworkRule { framework: "Vue", matches: is_vue },
    FrameworkRule { framework: "Angular", matches: is_angular },
    FrameworkRule { framework: "Svelte", matches: is_svelte },
    FrameworkRule { framework: "Flutter", matches: is_flutter },
    FrameworkRule { framework: "HTML", matches: is_html },
    FrameworkRule { framework: "JavaScript", matches: is_plain_script },
];

pub fn detect_framework(files: &[ImportFile]) -> &'static str {
    let evidence = Evidence::from_files(files);
    for rule in FRAMEWORK_RULES {
        if (rule.matches)(&evidence) {
            tracing::debug!("framework rule matched: {}", rule.framework);
            return rule.framework;
        }
    }
    DEFAULT_FRAMEWORK
}

fn has_entry_name(file: &ImportFile) -> bool {
    let base = base_name(&file.name).to_lowercase();
    base.starts_with("index.") || base.starts_with("main.")
}

fn is_flagged_primary(file: &ImportFile) -> bool {
    file.primary
}

/// A file is the main file candidate if any of these hold.
pub const MAIN_FILE_RULES: &[fn(&ImportFile) -> bool] = &[has_entry_name, is_flagged_primary];

/// First file (in input order) any main-file rule accepts, else the first file,
/// else empty.
pub fn detect_main_file(files: &[ImportFile]) -> String {
    files
        .iter()
        .find(|f| MAIN_FILE_RULES.iter().any(|rule| rule(*f)))
        .or_else(|| files.first())
        .map(|f| f.name.clone())
        .unwrap_or_default()
}

static EXTENSION_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("jsx", "JSX"),
        ("tsx", "TSX"),
        ("js", "JavaScript"),
        ("ts", "TypeScript"),
        ("vue", "Vue"),
        ("svelte", "Svelte"),
        ("html", "HTML"),
        ("css", "CSS"),
        ("scss", "SCSS"),
        ("sass", "SASS"),
        ("dart", "Dart"),
        ("swift", "Swift"),
        ("kt", "Kotlin"),
    ])
});

static SNIPPET_EXTENSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("javascript", "js"),
        ("typescript", "ts"),
        ("react", "jsx"),
        ("vue", "vue"),
        ("html", "html"),
        ("css", "css"),
        ("dart", "dart"),
        ("swift", "swift"),
        ("kotlin", "kt"),
    ])
});

/// Spellings that language tags are normalised to.
const CANONICAL_TAGS: &[&str] = &[
    "React",
    "Vue",
    "Angular",
    "Svelte",
    "Flutter",
    "HTML",
    "JavaScript",
    "TypeScript",
    "CSS",
    "Dart",
    "Swift",
    "Kotlin",
];

pub fn language_for_file(name: &str) -> Option<&'static str> {
    let ext = extension_of(name)?;
    EXTENSION_LANGUAGES.get(ext.as_str()).copied()
}

pub fn snippet_extension(language: Option<&str>) -> &'static str {
    language
        .map(|l| l.trim().to_lowercase())
        .and_then(|l| SNIPPET_EXTENSIONS.get(l.as_str()).copied())
        .unwrap_or(DEFAULT_SNIPPET_EXTENSION)
}

/// `javascript` -> `JavaScript`; tags we do not know are returned trimmed.
pub fn canonical_tag(tag: &str) -> String {
    let tag = tag.trim();
    CANONICAL_TAGS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(tag))
        .map(|known| known.to_string())
        .unwrap_or_else(|| tag.to_string())
}
