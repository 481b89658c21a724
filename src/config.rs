use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::tokenizer::{ASSIGN, tokenize};

/// Errors that can occur while reading or querying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to open \"{path}\": {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed at line {line}: {reason}")]
    Syntax { line: usize, reason: &'static str },

    #[error("key \"{0}\" does not exist")]
    MissingKey(String),

    #[error("failed to read \"{key}\" from value \"{value}\"")]
    InvalidValue { key: String, value: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Flat `key = value` store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration text, logging and skipping malformed lines.
    pub fn parse_str(text: &str) -> Self {
        let mut config = Self::new();
        for (number, line) in text.lines().enumerate() {
            match parse_line(line) {
                Ok(Some((key, value))) => config.set(key, value),
                Ok(None) => {}
                Err(reason) => {
                    log::warn!("Config line {} skipped: {}", number + 1, reason);
                }
            }
        }
        config
    }

    /// Parse configuration text, stopping at the first malformed line.
    pub fn parse_str_strict(text: &str) -> ConfigResult<Self> {
        let mut config = Self::new();
        for (number, line) in text.lines().enumerate() {
            match parse_line(line) {
                Ok(Some((key, value))) => config.set(key, value),
                Ok(None) => {}
                Err(reason) => {
                    return Err(ConfigError::Syntax {
                        line: number + 1,
                        reason,
                    });
                }
            }
        }
        Ok(config)
    }

    /// Read and leniently parse a configuration file
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse_str(&text);
        log::info!("Loaded {} config entries from {}", config.len(), path.display());
        Ok(config)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up `key` and convert it to `T`
    pub fn get<T: FromStr>(&self, key: &str) -> ConfigResult<T> {
        let value = self
            .raw(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_owned()))?;
        value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Look up `key`, falling back to `default` when absent or invalid
    pub fn get_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(value) => value,
            Err(ConfigError::MissingKey(_)) => default,
            Err(err) => {
                log::warn!("Config: {}; keeping default", err);
                default
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Result<Option<(String, String)>, &'static str> {
    if line.trim_start().starts_with('#') {
        return Ok(None);
    }

    match tokenize(line).as_slice() {
        [] => Ok(None),
        [key, op, value] if op == ASSIGN => Ok(Some((key.clone(), value.clone()))),
        [_, _, _] => Err("wrong operator"),
        _ => Err("wrong number of tokens"),
    }
}

/// Settings that shape the editor's view and file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory holding level files
    pub level_dir: PathBuf,
    /// Scale change per wheel notch
    pub zoom_coeff: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// World units per screen pixel at startup
    pub initial_scale: f64,
    /// Pick distance for vertices and lines, in screen pixels
    pub pick_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            level_dir: PathBuf::from("level"),
            zoom_coeff: 0.0005,
            zoom_min: 0.0005,
            zoom_max: 0.05,
            initial_scale: 0.005,
            pick_radius: 8.0,
        }
    }
}

impl EditorConfig {
    /// Overlay the keys present in `config` on top of the defaults.
    ///
    /// Keys are matched against the serialized field names; a value that
    /// does not fit its field's type is skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let mut settings = match Self::overlay(&defaults, config) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Config: cannot build editor settings: {}; using defaults", err);
                defaults.clone()
            }
        };

        if !(settings.zoom_min > 0.0 && settings.zoom_min <= settings.zoom_max) {
            log::warn!(
                "Config: invalid zoom range [{}, {}]; using defaults",
                settings.zoom_min,
                settings.zoom_max
            );
            settings.zoom_min = defaults.zoom_min;
            settings.zoom_max = defaults.zoom_max;
        }
        settings.initial_scale = settings.initial_scale.clamp(settings.zoom_min, settings.zoom_max);
        settings
    }

    fn overlay(defaults: &Self, config: &Config) -> serde_json::Result<Self> {
        let Value::Object(mut fields) = serde_json::to_value(defaults)? else {
            return Ok(defaults.clone());
        };

        for (key, field) in fields.iter_mut() {
            let Some(raw) = config.raw(key) else {
                continue;
            };
            match typed_value(field, raw) {
                Some(value) => *field = value,
                None => log::warn!(
                    "Config: {}; keeping default",
                    ConfigError::InvalidValue {
                        key: key.clone(),
                        value: raw.to_owned(),
                    }
                ),
            }
        }

        serde_json::from_value(Value::Object(fields))
    }
}

/// Convert `raw` to the JSON type of the field it replaces
fn typed_value(field: &Value, raw: &str) -> Option<Value> {
    match field {
        Value::Number(_) => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        Value::Bool(_) => raw.parse().ok().map(Value::Bool),
        _ => Some(Value::String(raw.to_owned())),
    }
}
