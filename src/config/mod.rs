use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, Result},
    utils::{
        persistence::{ensure_dir, load_json_or_default, save_json},
        PathResolver,
    },
};

/// User-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub screen_reader_mode: bool,
    #[serde(default)]
    pub high_contrast_mode: bool,
    #[serde(default)]
    pub quiet_mode: bool,
}

impl Config {
    fn default_ui_color_enabled() -> bool {
        true
    }

    pub const KEYS: &'static [&'static str] =
        &["color", "screen-reader", "high-contrast", "quiet"];

    /// Applies `key=value` from the `config set` command.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "color" => self.ui_color_enabled = parse_switch(key, value)?,
            "screen-reader" => self.screen_reader_mode = parse_switch(key, value)?,
            "high-contrast" => self.high_contrast_mode = parse_switch(key, value)?,
            "quiet" => self.quiet_mode = parse_switch(key, value)?,
            other => {
                return Err(AppError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("color", on_off(self.ui_color_enabled).to_string()),
            ("screen-reader", on_off(self.screen_reader_mode).to_string()),
            ("high-contrast", on_off(self.high_contrast_mode).to_string()),
            ("quiet", on_off(self.quiet_mode).to_string()),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_color_enabled: true,
            screen_reader_mode: false,
            high_contrast_mode: false,
            quiet_mode: false,
        }
    }
}

pub fn parse_switch(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(AppError::Config(format!(
            "`{key}` expects on/off, got `{value}`"
        ))),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        load_json_or_default(&self.path).map_err(|err| AppError::Config(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        save_json(config, &self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
