use crate::commands::{CmdMessage, CmdResult};
use crate::config::QuoteConfig;
use crate::error::{QuoteError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = QuoteConfig::load(config_dir)?;

    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| QuoteError::Validation(format!("Unknown config key: {}", key)))?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} = {}", key, value)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;

    #[test]
    fn set_persists_and_show_reads_back() {
        let temp_dir = tempfile::tempdir().unwrap();

        run(
            temp_dir.path(),
            ConfigAction::Set("backend".into(), "sqlite".into()),
        )
        .unwrap();

        let result = run(temp_dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap().backend, BackendKind::Sqlite);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(run(temp_dir.path(), ConfigAction::ShowKey("nope".into())).is_err());
        assert!(run(
            temp_dir.path(),
            ConfigAction::Set("nope".into(), "x".into())
        )
        .is_err());
    }
}
