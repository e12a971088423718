use crate::commands::{CmdMessage, CmdResult};
use crate::config::{ComplabConfig, KEYS};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = ComplabConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => result.add_message(CmdMessage::error(format!(
                    "Unknown config key: {} (known: {})",
                    key,
                    KEYS.join(", ")
                ))),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result.with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn show_all_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap(), ComplabConfig::default());
    }

    #[test]
    fn set_persists_and_show_key_reads_back() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            ConfigAction::Set("default-platform".into(), "Mobile".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "default-platform set to Mobile");

        let result = run(temp.path(), ConfigAction::ShowKey("default-platform".into())).unwrap();
        assert_eq!(result.messages[0].content, "Mobile");
    }

    #[test]
    fn unknown_key_is_reported_not_failed() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowKey("nope".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);

        let result = run(temp.path(), ConfigAction::Set("nope".into(), "x".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!temp.path().join("config.json").exists());
    }
}
