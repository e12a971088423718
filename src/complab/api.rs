//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all complab operations, whatever UI sits on top.
//!
//! The facade dispatches to the matching command, turns loosely typed input
//! (an import kind given as a string) into typed requests, and supplies the
//! configured defaults commands need. It does no business logic, prints
//! nothing and returns `Result<CmdResult>`.
//!
//! ## Generic Over DataStore
//!
//! `ComplabApi<S: DataStore>` runs on `FileStore` in production and on
//! `InMemoryStore` in tests.

use crate::classify::{ImportKind, ImportOverrides, ImportRequest};
use crate::commands;
use crate::config::ComplabConfig;
use crate::error::Result;
use crate::model::{ComponentMeta, SourceFiles};
use crate::store::DataStore;

/// The main API facade for complab operations.
pub struct ComplabApi<S: DataStore> {
    store: S,
    paths: commands::ComplabPaths,
    config: ComplabConfig,
}

impl<S: DataStore> ComplabApi<S> {
    pub fn new(store: S, paths: commands::ComplabPaths, config: ComplabConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn list(&mut self, filter: &ComponentFilter) -> Result<commands::CmdResult> {
        commands::list::run(&mut self.store, filter)
    }

    pub fn get(&self, id: &str) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn save(&mut self, meta: ComponentMeta, files: SourceFiles) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.store, meta, files)
    }

    pub fn delete<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, ids)
    }

    /// Imports an already gathered request.
    pub fn import(&mut self, request: &ImportRequest) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, request, &self.config.classify_defaults())
    }

    /// Imports raw input. `kind` must be `folder`, `files` or `snippet`;
    /// anything else fails with `UnsupportedKind` before any input is read.
    pub fn import_from(
        &mut self,
        kind: &str,
        source: ImportSource,
        overrides: ImportOverrides,
    ) -> Result<commands::CmdResult> {
        let kind: ImportKind = kind.parse()?;
        let payload = commands::import::gather(kind, source, &self.config.intake_options())?;
        let request = ImportRequest::new(payload).with_overrides(overrides);
        self.import(&request)
    }

    pub fn export(
        &self,
        id: &str,
        format: ExportFormat,
        dest: Option<std::path::PathBuf>,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, id, format, dest)
    }

    pub fn doctor(&mut self) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.store)
    }

    pub fn component_paths<I: AsRef<str>>(&self, ids: &[I]) -> Result<commands::CmdResult> {
        commands::paths::run(&self.store, ids)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths.config_dir, action)
    }

    pub fn paths(&self) -> &commands::ComplabPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::export::ExportFormat;
pub use commands::import::ImportSource;
pub use commands::list::ComponentFilter;
pub use commands::{CmdMessage, CmdResult, ComplabPaths, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComplabError;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn api(config_dir: PathBuf) -> ComplabApi<InMemoryStore> {
        let paths = ComplabPaths {
            root: PathBuf::from("/mem"),
            config_dir,
        };
        ComplabApi::new(InMemoryStore::new(), paths, ComplabConfig::default())
    }

    fn snippet(code: &str) -> ImportSource {
        ImportSource::Code {
            code: code.into(),
            language: Some("html".into()),
        }
    }

    #[test]
    fn unknown_import_kind_is_unsupported() {
        let mut api = api(PathBuf::from("/unused"));
        let err = api
            .import_from("zip", snippet("<p/>"), ImportOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ComplabError::UnsupportedKind(kind) if kind == "zip"));
    }

    #[test]
    fn import_then_list_get_delete() {
        let mut api = api(PathBuf::from("/unused"));
        let overrides = ImportOverrides {
            name: Some("Hero Banner".into()),
            ..Default::default()
        };
        api.import_from("snippet", snippet("<h1/>"), overrides).unwrap();

        let listed = api.list(&ComponentFilter::default()).unwrap().listed;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].meta.framework, "HTML");
        assert_eq!(listed[0].shard, "HTML");
        assert_eq!(listed[0].meta.platform, "Web");

        let component = api.get("herobanner").unwrap().component.unwrap();
        assert_eq!(component.files["Hero Banner.html"], "<h1/>");

        api.delete(&["herobanner"]).unwrap();
        assert!(matches!(api.get("herobanner"), Err(ComplabError::NotFound(_))));
    }

    #[test]
    fn import_uses_configured_platform() {
        let paths = ComplabPaths {
            root: PathBuf::from("/mem"),
            config_dir: PathBuf::from("/unused"),
        };
        let config = ComplabConfig {
            default_platform: "Desktop".into(),
            ..Default::default()
        };
        let mut api = ComplabApi::new(InMemoryStore::new(), paths, config);
        let result = api
            .import_from("snippet", snippet("<p/>"), ImportOverrides::default())
            .unwrap();
        assert_eq!(result.affected[0].platform, "Desktop");
    }

    #[test]
    fn config_goes_to_config_dir() {
        let temp = TempDir::new().unwrap();
        let api = api(temp.path().to_path_buf());
        api.config(ConfigAction::Set("ignored-dirs".into(), "vendor".into()))
            .unwrap();
        assert!(temp.path().join("config.json").exists());
        assert_eq!(api.paths().config_dir, temp.path());
    }
}
