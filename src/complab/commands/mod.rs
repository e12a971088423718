use crate::config::ComplabConfig;
use crate::model::{Component, ComponentMeta, StoredEntry};
use std::path::PathBuf;

pub mod config;
pub mod delete;
pub mod doctor;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod paths;
pub mod save;

/// Where the store and the config file live for this process.
#[derive(Debug, Clone)]
pub struct ComplabPaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Components written or removed by the command
    pub affected: Vec<ComponentMeta>,
    /// Entries listed, in display order
    pub listed: Vec<StoredEntry>,
    /// Full component read by `get`
    pub component: Option<Component>,
    pub paths: Vec<PathBuf>,
    pub config: Option<ComplabConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, metas: Vec<ComponentMeta>) -> Self {
        self.affected = metas;
        self
    }

    pub fn with_listed(mut self, entries: Vec<StoredEntry>) -> Self {
        self.listed = entries;
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: ComplabConfig) -> Self {
        self.config = Some(config);
        self
    }
}
