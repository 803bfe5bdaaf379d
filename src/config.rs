//! Highlighting configuration
//!
//! A [`HighlightingConfig`] is the snapshot the engine reads on every call:
//! the global switch, the depth limit, per-highlighter toggles, duration
//! thresholds and user-defined patterns. It is persisted as TOML:
//!
//! ```toml
//! enabled = true
//! max_length = 10240
//!
//! [highlighters]
//! number = false
//!
//! [duration_thresholds]
//! slow = 100.0
//! very_slow = 500.0
//! critical = 5000.0
//!
//! [[custom_patterns]]
//! name = "tenant"
//! pattern = "tenant_[0-9]+"
//! style = "bold magenta"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::highlighting::{validate_pattern, HighlightError, CUSTOM_PRIORITY_BAND};

/// Default depth limit in bytes
pub const DEFAULT_MAX_LENGTH: usize = 10_240;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Highlighting configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightingConfig {
    /// Global switch; when false every line is emitted unstyled
    pub enabled: bool,

    /// Bytes of each line subjected to highlighting; the rest passes through
    pub max_length: usize,

    /// Explicit per-highlighter toggles; missing names are enabled
    #[serde(rename = "highlighters")]
    pub per_highlighter_enabled: BTreeMap<String, bool>,

    /// Duration classification thresholds
    pub duration_thresholds: DurationThresholds,

    /// User-defined regex highlighters
    pub custom_patterns: Vec<CustomPattern>,
}

impl Default for HighlightingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_length: DEFAULT_MAX_LENGTH,
            per_highlighter_enabled: BTreeMap::new(),
            duration_thresholds: DurationThresholds::default(),
            custom_patterns: Vec::new(),
        }
    }
}

/// Duration thresholds in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationThresholds {
    pub slow: f64,
    pub very_slow: f64,
    pub critical: f64,
}

impl Default for DurationThresholds {
    fn default() -> Self {
        Self {
            slow: 100.0,
            very_slow: 500.0,
            critical: 5000.0,
        }
    }
}

/// Severity bucket for a measured duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationLevel {
    Fast,
    Slow,
    VerySlow,
    Critical,
}

impl DurationLevel {
    /// Style key used for this bucket
    pub fn style_key(&self) -> &'static str {
        match self {
            DurationLevel::Fast => "duration_fast",
            DurationLevel::Slow => "duration_slow",
            DurationLevel::VerySlow => "duration_very_slow",
            DurationLevel::Critical => "duration_critical",
        }
    }
}

impl DurationThresholds {
    /// Classify a duration given in milliseconds; thresholds are inclusive
    pub fn classify(&self, millis: f64) -> DurationLevel {
        if millis >= self.critical {
            DurationLevel::Critical
        } else if millis >= self.very_slow {
            DurationLevel::VerySlow
        } else if millis >= self.slow {
            DurationLevel::Slow
        } else {
            DurationLevel::Fast
        }
    }
}

/// A user-defined highlighter entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    pub name: String,
    pub pattern: String,
    pub style: String,
    #[serde(default = "default_custom_priority")]
    pub priority: i32,
}

fn default_custom_priority() -> i32 {
    CUSTOM_PRIORITY_BAND
}

impl CustomPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            style: style.into(),
            priority: CUSTOM_PRIORITY_BAND,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl HighlightingConfig {
    /// Default config file location (`<config dir>/pgtail/highlighting.toml`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pgtail")
            .join("highlighting.toml")
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        debug!("Loaded highlighting config from {}", path.display());
        Ok(config)
    }

    /// Load from file, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("No highlighting config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: HighlightingConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to TOML file, creating parent directories
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml_str = self.to_toml()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_str)?;
        debug!("Saved highlighting config to {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    ///
    /// Custom pattern regexes are not compiled here; the registry rejects bad
    /// entries individually so one typo does not disable the rest.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::ValidationError(
                "max_length must be greater than 0".to_string(),
            ));
        }

        let t = &self.duration_thresholds;
        if !(t.slow > 0.0 && t.slow < t.very_slow && t.very_slow < t.critical) {
            return Err(ConfigError::ValidationError(format!(
                "duration_thresholds must be positive and ascending (slow={}, very_slow={}, critical={})",
                t.slow, t.very_slow, t.critical
            )));
        }

        let mut names = std::collections::HashSet::new();
        for custom in &self.custom_patterns {
            if custom.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "custom pattern name must not be empty".to_string(),
                ));
            }
            if !names.insert(custom.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate custom pattern name: {}",
                    custom.name
                )));
            }
        }

        Ok(())
    }

    /// Whether a highlighter is enabled (default true)
    pub fn is_highlighter_enabled(&self, name: &str) -> bool {
        self.per_highlighter_enabled
            .get(name)
            .copied()
            .unwrap_or(true)
    }

    pub fn set_highlighter_enabled(&mut self, name: impl Into<String>, enabled: bool) {
        self.per_highlighter_enabled.insert(name.into(), enabled);
    }

    /// Add a custom pattern after checking its regex
    ///
    /// Replaces an existing entry with the same name.
    pub fn add_custom_pattern(&mut self, pattern: CustomPattern) -> Result<(), HighlightError> {
        validate_pattern(&pattern.name, &pattern.pattern)?;
        self.custom_patterns.retain(|p| p.name != pattern.name);
        self.custom_patterns.push(pattern);
        Ok(())
    }

    /// Remove a custom pattern by name; returns whether one was removed
    pub fn remove_custom_pattern(&mut self, name: &str) -> bool {
        let before = self.custom_patterns.len();
        self.custom_patterns.retain(|p| p.name != name);
        self.custom_patterns.len() != before
    }
}
