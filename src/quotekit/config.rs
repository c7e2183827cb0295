use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

/// Which persistence backend the store uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Two-sheet xlsx workbook.
    #[default]
    Workbook,
    /// Embedded sqlite database file.
    Sqlite,
    /// Workbook with an image column and an attachment folder.
    Gallery,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Workbook => write!(f, "workbook"),
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Gallery => write!(f, "gallery"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workbook" | "xlsx" => Ok(BackendKind::Workbook),
            "sqlite" | "db" => Ok(BackendKind::Sqlite),
            "gallery" => Ok(BackendKind::Gallery),
            other => Err(format!(
                "Unknown backend '{}'. Expected 'workbook', 'sqlite' or 'gallery'.",
                other
            )),
        }
    }
}

/// Configuration for quotekit, stored in .quotekit/config.json.
///
/// The active store location is an explicit value here rather than a
/// module-level global; every invocation constructs its backend from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// Path to the workbook or database file.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Path to the quote-request email template.
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Address copied on every outgoing quote request.
    #[serde(default)]
    pub cc: Option<String>,

    #[serde(default = "default_subject")]
    pub subject: String,

    /// Pause between consecutive sends, to avoid overwhelming the mail client.
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/database.xlsx")
}

fn default_template_path() -> PathBuf {
    PathBuf::from("data/email_template.txt")
}

fn default_subject() -> String {
    "Price quote request".to_string()
}

fn default_send_delay_ms() -> u64 {
    500
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            store_path: default_store_path(),
            template_path: default_template_path(),
            cc: None,
            subject: default_subject(),
            send_delay_ms: default_send_delay_ms(),
        }
    }
}

impl QuoteConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuoteError::Io)?;
        let config: QuoteConfig =
            serde_json::from_str(&content).map_err(QuoteError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QuoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QuoteError::Serialization)?;
        fs::write(config_path, content).map_err(QuoteError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "backend" => Some(self.backend.to_string()),
            "store" => Some(self.store_path.display().to_string()),
            "template" => Some(self.template_path.display().to_string()),
            "cc" => Some(self.cc.clone().unwrap_or_default()),
            "subject" => Some(self.subject.clone()),
            "send-delay-ms" => Some(self.send_delay_ms.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend" => {
                self.backend = value.parse().map_err(QuoteError::Validation)?;
            }
            "store" => self.store_path = PathBuf::from(value),
            "template" => self.template_path = PathBuf::from(value),
            "cc" => {
                self.cc = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "subject" => self.subject = value.to_string(),
            "send-delay-ms" => {
                self.send_delay_ms = value.parse().map_err(|_| {
                    QuoteError::Validation(format!("'{}' is not a valid delay in ms", value))
                })?;
            }
            other => {
                return Err(QuoteError::Validation(format!(
                    "Unknown config key: {}",
                    other
                )));
            }
        }
        Ok(())
    }

    /// All keys accepted by [`get`](Self::get) and [`set`](Self::set).
    pub fn keys() -> &'static [&'static str] {
        &[
            "backend",
            "store",
            "template",
            "cc",
            "subject",
            "send-delay-ms",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::default();
        assert_eq!(config.backend, BackendKind::Workbook);
        assert_eq!(config.store_path, PathBuf::from("data/database.xlsx"));
        assert_eq!(config.send_delay_ms, 500);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = QuoteConfig::load(temp_dir.path().join("nope")).unwrap();
        assert_eq!(config, QuoteConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = QuoteConfig::default();
        config.set("backend", "sqlite").unwrap();
        config.set("store", "data/database.db").unwrap();
        config.set("cc", "purchasing@example.com").unwrap();
        config.save(temp_dir.path()).unwrap();

        let loaded = QuoteConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.backend, BackendKind::Sqlite);
        assert_eq!(loaded.store_path, PathBuf::from("data/database.db"));
        assert_eq!(loaded.cc.as_deref(), Some("purchasing@example.com"));
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = QuoteConfig::default();
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_set_rejects_bad_delay() {
        let mut config = QuoteConfig::default();
        assert!(config.set("send-delay-ms", "soon").is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut config = QuoteConfig::default();
        config.set("subject", "Quote por favor").unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: QuoteConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }
}
