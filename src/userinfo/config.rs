//! Client configuration, read from an optional JSON file.
//!
//! Every key has a default and unknown keys are rejected, so a typo in the file
//! is an error rather than a silently ignored setting.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `color` | `auto` | `auto`, `always` or `never` |
//! | `max_cell_width` | `32` | Table cells longer than this are truncated |
//! | `log_level` | `warn` | Log filter used when no `-v` flag is given |
//! | `prompt` | `userinfo> ` | Interactive prompt |

use crate::error::{Result, UserInfoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_MAX_CELL_WIDTH: usize = 32;
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_PROMPT: &str = "userinfo> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "unknown color choice '{}' (expected auto, always or never)",
                other
            )),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub color: ColorChoice,

    #[serde(default = "default_max_cell_width")]
    pub max_cell_width: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_max_cell_width() -> usize {
    DEFAULT_MAX_CELL_WIDTH
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::default(),
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            log_level: default_log_level(),
            prompt: default_prompt(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`. Unlike an absent `--config`, a path that
    /// can't be read is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| UserInfoError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
            .map_err(|e| UserInfoError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        if config.max_cell_width < 2 {
            return Err(UserInfoError::Config(format!(
                "max_cell_width must be at least 2, got {}",
                config.max_cell_width
            )));
        }
        Ok(config)
    }
}
