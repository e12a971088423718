use crate::api::{ComplabApi, ComplabPaths};
use crate::config::ComplabConfig;
use crate::error::{ComplabError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

pub const ROOT_ENV: &str = "COMPLAB_ROOT";
pub const CONFIG_DIR_ENV: &str = "COMPLAB_CONFIG_DIR";

pub struct ComplabContext {
    pub api: ComplabApi<FileStore>,
    pub config: ComplabConfig,
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "complab", "complab")
        .ok_or_else(|| ComplabError::Api("Could not determine the home directory".to_string()))
}

/// `COMPLAB_CONFIG_DIR`, else the platform config directory.
pub fn config_dir() -> Result<PathBuf> {
    match env_path(CONFIG_DIR_ENV) {
        Some(dir) => Ok(dir),
        None => Ok(project_dirs()?.config_dir().to_path_buf()),
    }
}

/// Picks the store root: the flag, then the environment, then the config
/// file, then `<data dir>/components`.
pub fn resolve_root(
    flag: Option<PathBuf>,
    from_env: Option<PathBuf>,
    config: &ComplabConfig,
    data_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    flag.or(from_env)
        .or_else(|| config.root.clone())
        .or_else(|| data_dir.map(|d| d.join("components")))
        .ok_or_else(|| ComplabError::Api("No store root could be determined".to_string()))
}

pub fn initialize(root_flag: Option<PathBuf>) -> Result<ComplabContext> {
    let config_dir = config_dir()?;
    let config = match ComplabConfig::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("ignoring unreadable config in {}: {}", config_dir.display(), e);
            ComplabConfig::default()
        }
    };

    let data_dir = project_dirs().ok().map(|d| d.data_dir().to_path_buf());
    let root = resolve_root(root_flag, env_path(ROOT_ENV), &config, data_dir)?;
    tracing::debug!("store root: {}", root.display());

    let store = FileStore::new(root.clone());
    let paths = ComplabPaths { root, config_dir };
    let api = ComplabApi::new(store, paths, config.clone());

    Ok(ComplabContext { api, config })
}
