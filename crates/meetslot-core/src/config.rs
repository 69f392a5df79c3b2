//! TOML-based engine configuration.
//!
//! Stores tunables for:
//! - Candidate generation and result sizes
//! - Calendar provider timeouts and failure policy
//! - Slot scoring weights
//! - Log level
//!
//! Configuration is stored at `~/.config/meetslot/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::scoring::ScoringWeights;

/// Candidate generation and result sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Ranked slots kept in a proposal
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Upper bound on candidates generated per run
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Default lookahead when the caller does not supply a window end
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: i64,
    /// Longest window a single run accepts
    #[serde(default = "default_max_window_days")]
    pub max_window_days: i64,
    #[serde(default = "default_business_start_hour")]
    pub business_start_hour: u32,
    #[serde(default = "default_business_end_hour")]
    pub business_end_hour: u32,
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
}

/// What to do with a participant whose calendar cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFailurePolicy {
    /// Treat the participant as fully free
    #[default]
    FailOpen,
    /// Leave the participant out of the intersection
    Exclude,
}

/// Calendar provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default)]
    pub failure_policy: ProviderFailurePolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/meetslot/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_max_suggestions() -> usize {
    3
}
fn default_max_candidates() -> usize {
    64
}
fn default_lookahead_days() -> i64 {
    7
}
fn default_max_window_days() -> i64 {
    31
}
fn default_business_start_hour() -> u32 {
    9
}
fn default_business_end_hour() -> u32 {
    17
}
fn default_max_participants() -> usize {
    20
}
fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            max_candidates: default_max_candidates(),
            lookahead_days: default_lookahead_days(),
            max_window_days: default_max_window_days(),
            business_start_hour: default_business_start_hour(),
            business_end_hour: default_business_end_hour(),
            max_participants: default_max_participants(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            failure_policy: ProviderFailurePolicy::FailOpen,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Returns `~/.config/meetslot[-dev]/` based on MEETSLOT_ENV.
///
/// Set MEETSLOT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEETSLOT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("meetslot-dev")
    } else {
        base_dir.join("meetslot")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl EngineConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".into(),
        };
        let unparsable = |kind: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("cannot parse '{value}' as {kind}"),
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| unparsable("bool"))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| unparsable("number"))?
                        } else {
                            return Err(unparsable("number"));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|_| unparsable("JSON"))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject combinations the engine cannot work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        let s = &self.scheduling;
        if s.max_suggestions == 0 {
            return Err(invalid("scheduling.max_suggestions", "must be at least 1"));
        }
        if s.max_candidates == 0 {
            return Err(invalid("scheduling.max_candidates", "must be at least 1"));
        }
        if s.lookahead_days <= 0 {
            return Err(invalid("scheduling.lookahead_days", "must be positive"));
        }
        if s.max_window_days < s.lookahead_days {
            return Err(invalid(
                "scheduling.max_window_days",
                "must be at least lookahead_days",
            ));
        }
        if s.business_end_hour > 24 || s.business_start_hour >= s.business_end_hour {
            return Err(invalid(
                "scheduling.business_start_hour",
                "must be before business_end_hour (<= 24)",
            ));
        }
        if s.max_participants == 0 {
            return Err(invalid("scheduling.max_participants", "must be at least 1"));
        }
        if self.provider.fetch_timeout_secs == 0 {
            return Err(invalid("provider.fetch_timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: EngineConfig = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
