use crate::classify::intake::IntakeOptions;
use crate::classify::{ClassifyDefaults, DEFAULT_PLATFORM};
use crate::error::{ComplabError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: [&str; 4] = ["root", "default-platform", "import-extensions", "ignored-dirs"];

/// Configuration for complab, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplabConfig {
    /// Store root. When unset the platform data directory is used.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Platform recorded on imports that don't specify one
    #[serde(default = "default_platform")]
    pub default_platform: String,

    /// Extensions picked up when importing a folder
    #[serde(default = "default_import_extensions")]
    pub import_extensions: Vec<String>,

    /// Directories skipped when importing a folder
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_import_extensions() -> Vec<String> {
    [
        ".js", ".jsx", ".ts", ".tsx", ".html", ".css", ".scss", ".sass", ".dart", ".swift",
        ".kt", ".md", ".json", ".vue", ".svelte",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_ignored_dirs() -> Vec<String> {
    ["node_modules", ".git", "dist", "build"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ComplabConfig {
    fn default() -> Self {
        Self {
            root: None,
            default_platform: default_platform(),
            import_extensions: default_import_extensions(),
            ignored_dirs: default_ignored_dirs(),
        }
    }
}

fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_lowercase()
    } else {
        format!(".{}", ext.to_lowercase())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl ComplabConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ComplabError::Io)?;
        let config: ComplabConfig =
            serde_json::from_str(&content).map_err(ComplabError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ComplabError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ComplabError::Serialization)?;
        fs::write(config_path, content).map_err(ComplabError::Io)?;
        Ok(())
    }

    /// Display value for a key, `None` for unknown keys
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "root" => Some(
                self.root
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "default-platform" => Some(self.default_platform.clone()),
            "import-extensions" => Some(self.import_extensions.join(",")),
            "ignored-dirs" => Some(self.ignored_dirs.join(",")),
            _ => None,
        }
    }

    /// Set a key from its string form. Lists are comma separated.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "root" => {
                let value = value.trim();
                self.root = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "default-platform" => {
                if value.trim().is_empty() {
                    return Err("default-platform cannot be empty".to_string());
                }
                self.default_platform = value.trim().to_string();
            }
            "import-extensions" => {
                self.import_extensions = split_list(value).iter().map(|e| normalize_ext(e)).collect();
            }
            "ignored-dirs" => self.ignored_dirs = split_list(value),
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn intake_options(&self) -> IntakeOptions {
        IntakeOptions {
            extensions: self.import_extensions.clone(),
            ignored_dirs: self.ignored_dirs.clone(),
        }
    }

    pub fn classify_defaults(&self) -> ClassifyDefaults {
        ClassifyDefaults {
            platform: self.default_platform.clone(),
        }
    }
}
