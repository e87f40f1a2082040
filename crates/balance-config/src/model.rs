use std::path::{Path, PathBuf};

use balance_domain::Period;
use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Identity used to partition stored ledgers when no user is signed in.
    #[serde(default = "Config::default_user_value")]
    pub default_user: String,
    #[serde(default)]
    pub default_period: Period,
    #[serde(default = "Config::default_export_file_value")]
    pub export_file_name: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for stored state. Defaults to `<base>/state`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_user: Self::default_user_value(),
            default_period: Period::default(),
            export_file_name: Self::default_export_file_value(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_user_value() -> String {
        "default_user@gmail.com".into()
    }

    pub fn default_export_file_value() -> String {
        "monthlyBalances.json".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => base.join("state"),
        }
    }
}
