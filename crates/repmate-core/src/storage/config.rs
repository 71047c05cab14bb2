//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - session default timings (fallbacks for exercises without overrides)
//! - announcement behavior (enabled flag, optional speech command)
//! - path to a custom workout plan JSON file
//!
//! Configuration is stored at `~/.config/repmate/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::plan::SessionDefaults;

/// Session-wide timing fallbacks, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_rest_between_exercises")]
    pub rest_between_exercises: u64,
    #[serde(default = "default_rest_between_reps")]
    pub rest_between_reps: u64,
    #[serde(default = "default_rep_duration")]
    pub rep_duration: u64,
}

/// Spoken announcement configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// External speech command invoked with the cue text as its single
    /// argument (e.g. `say` or `espeak`). `None` prints cues instead.
    #[serde(default)]
    pub command: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/repmate/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to a custom plan JSON file. `None` uses the built-in plan.
    /// Kept ahead of the tables so TOML serialization stays valid.
    #[serde(default)]
    pub plan_path: Option<String>,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub announcements: AnnouncementsConfig,
}

fn default_rest_between_exercises() -> u64 {
    30
}
fn default_rest_between_reps() -> u64 {
    15
}
fn default_rep_duration() -> u64 {
    2
}
fn default_true() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rest_between_exercises: default_rest_between_exercises(),
            rest_between_reps: default_rest_between_reps(),
            rep_duration: default_rep_duration(),
        }
    }
}

impl Default for AnnouncementsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plan_path: None,
            defaults: DefaultsConfig::default(),
            announcements: AnnouncementsConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning the default when no config
    /// file exists yet.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            rest_between_exercises: self.defaults.rest_between_exercises,
            rest_between_reps: self.defaults.rest_between_reps,
            rep_duration: self.defaults.rep_duration,
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        match json.pointer(&pointer)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist. The new value
    /// must parse as the same JSON type the key currently holds.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        let pointer = format!("/{}", key.replace('.', "/"));
        let slot = json
            .pointer_mut(&pointer)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let parse_err = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        *slot = match slot {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| parse_err(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|e| parse_err(e.to_string()))?
                    .into(),
            ),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(parse_err("key is not a leaf value".into()).into());
            }
            _ => serde_json::Value::String(value.to_string()),
        };
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }
}
