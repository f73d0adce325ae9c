use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TicklistError};
use crate::filter::Filter;
use crate::theme::Theme;

const CONFIG_FILE_NAME: &str = ".ticklist.json";

/// Configuration settings for ticklist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ticklist_directory")]
    pub ticklist_directory: String,

    /// Theme the TUI starts with
    #[serde(default)]
    pub theme: Theme,

    /// Filter selected when a list is first shown
    #[serde(default)]
    pub default_filter: Filter,

    #[serde(default = "default_true")]
    pub display_progress_overview: bool,
}

fn default_ticklist_directory() -> String {
    "~".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticklist_directory: default_ticklist_directory(),
            theme: Theme::default(),
            default_filter: Filter::default(),
            display_progress_overview: true,
        }
    }
}

pub(crate) fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| TicklistError::General("could not find home directory".to_string()))
}

impl Config {
    /// Get the config file path (~/.ticklist.json)
    fn config_file_path() -> Result<PathBuf> {
        Ok(home_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Expand a leading `~` to the home directory.
    pub(crate) fn expand_home(path: &str) -> Result<PathBuf> {
        if path.starts_with('~') {
            let home = home_dir()?;
            let rest = path.trim_start_matches('~').trim_start_matches('/');
            if rest.is_empty() {
                Ok(home)
            } else {
                Ok(home.join(rest))
            }
        } else {
            Ok(PathBuf::from(path))
        }
    }

    /// Load configuration from ~/.ticklist.json, creating it with defaults
    /// on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing.
    /// Missing fields take their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let data = serde_json::to_string_pretty(&Config::default())?;
            fs::write(path, data)?;
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;

        // Expand ~ in ticklist_directory
        if config.ticklist_directory.starts_with('~') {
            config.ticklist_directory = Self::expand_home(&config.ticklist_directory)?
                .to_string_lossy()
                .to_string();
        }

        Ok(config)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    /// The loaded config, or defaults with a warning when loading failed.
    pub fn or_default(loaded: Result<Self>) -> Self {
        loaded.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load config, using defaults");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{ "ticklistDirectory": "/data" }"#).unwrap();
        assert_eq!(config.ticklist_directory, "/data");
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.default_filter, Filter::All);
        assert!(config.display_progress_overview);
    }

    #[test]
    fn test_full_config_deserializes() {
        let json = r#"{
            "ticklistDirectory": "/data",
            "theme": "blue",
            "defaultFilter": "active",
            "displayProgressOverview": false
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, Theme::Blue);
        assert_eq!(config.default_filter, Filter::Active);
        assert!(!config.display_progress_overview);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.theme, Theme::Light);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["defaultFilter"], "all");
    }

    #[test]
    fn test_load_from_keeps_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "theme": "dark", "ticklistDirectory": "/srv/todos" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.ticklist_directory, "/srv/todos");
    }
}
