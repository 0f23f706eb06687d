//! TOML Configuration File Support
//!
//! Optional configuration for the Conductor, read from
//! `~/.config/careline/conductor.toml`. Nothing here is required: with no
//! file and no environment variables the defaults reproduce the stock
//! assistant.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [thinking]
//! base_delay_ms = 1500
//! jitter_ms = 1000
//!
//! [profile]
//! name = "Dr. AI Assistant"
//! greeting = "Hello! How can I help you today?"
//! input_placeholder = "Describe your symptoms..."
//! input_hint = "Press Enter to send"
//! ```
//!
//! # Environment Variables
//!
//! - `CARELINE_CONFIG`: alternate config file path
//! - `CARELINE_THINKING_BASE_MS`: base reply delay in milliseconds
//! - `CARELINE_THINKING_JITTER_MS`: maximum extra random delay in milliseconds
//! - `CARELINE_GREETING`: greeting that seeds each session

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::AssistantProfile;
use crate::timing::{DEFAULT_BASE_DELAY, DEFAULT_JITTER};

/// Longest total thinking delay a configuration may ask for
pub const MAX_THINKING_DELAY: Duration = Duration::from_secs(60);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Thinking-delay section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinkingToml {
    /// Base delay before a reply, in milliseconds
    pub base_delay_ms: Option<u64>,

    /// Maximum random extra delay, in milliseconds
    pub jitter_ms: Option<u64>,
}

/// Profile section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileToml {
    /// Display name
    pub name: Option<String>,

    /// Header subtitle
    pub tagline: Option<String>,

    /// Greeting that seeds each session
    pub greeting: Option<String>,

    /// Disclaimer banner
    pub disclaimer: Option<String>,

    /// Placeholder for the empty input field
    pub input_placeholder: Option<String>,

    /// Hint under the input field
    pub input_hint: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConductorToml {
    /// Thinking-delay section
    pub thinking: ThinkingToml,

    /// Profile section
    pub profile: ProfileToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Effective configuration after merging file, environment and defaults
#[derive(Clone, Debug)]
pub struct ConductorConfigFile {
    /// Base delay before a reply
    pub base_delay: Duration,

    /// Maximum random extra delay
    pub delay_jitter: Duration,

    /// Assistant copy
    pub profile: AssistantProfile,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ConductorConfigFile {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            delay_jitter: DEFAULT_JITTER,
            profile: AssistantProfile::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ConductorConfigFile {
    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check the merged values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the greeting is blank or the
    /// longest possible delay exceeds [`MAX_THINKING_DELAY`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile.greeting.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "greeting must not be empty".to_string(),
            ));
        }
        let longest = self.base_delay.saturating_add(self.delay_jitter);
        if longest > MAX_THINKING_DELAY {
            return Err(ConfigError::ValidationError(format!(
                "thinking delay up to {}ms exceeds the {}ms maximum",
                longest.as_millis(),
                MAX_THINKING_DELAY.as_millis()
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/careline/conductor.toml` or
/// `~/.config/careline/conductor.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("careline").join("conductor.toml"))
}

/// Load configuration from all sources with proper priority
///
/// Reads the file named by `CARELINE_CONFIG` if set, otherwise
/// [`default_config_path`].
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or the
/// merged values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<ConductorConfigFile, ConfigError> {
    let path = std::env::var("CARELINE_CONFIG")
        .ok()
        .map(PathBuf::from)
        .or_else(default_config_path);
    load_config_from_path(path)
}

/// Load configuration from a specific path, then apply the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or the merged values fail validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ConductorConfigFile, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration from a specific path with a custom environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(
    path: Option<PathBuf>,
    env: F,
) -> Result<ConductorConfigFile, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ConductorConfigFile::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ConductorToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ConductorConfigFile, toml: &ConductorToml) {
    if let Some(ms) = toml.thinking.base_delay_ms {
        config.base_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.thinking.jitter_ms {
        config.delay_jitter = Duration::from_millis(ms);
    }

    let profile = &toml.profile;
    if let Some(ref name) = profile.name {
        config.profile.name.clone_from(name);
    }
    if let Some(ref tagline) = profile.tagline {
        config.profile.tagline.clone_from(tagline);
    }
    if let Some(ref greeting) = profile.greeting {
        config.profile.greeting.clone_from(greeting);
    }
    if let Some(ref disclaimer) = profile.disclaimer {
        config.profile.disclaimer.clone_from(disclaimer);
    }
    if let Some(ref placeholder) = profile.input_placeholder {
        config.profile.input_placeholder.clone_from(placeholder);
    }
    if let Some(ref hint) = profile.input_hint {
        config.profile.input_hint.clone_from(hint);
    }
}

/// Apply environment variable overrides to the config
pub(crate) fn apply_env_config<F>(config: &mut ConductorConfigFile, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env("CARELINE_THINKING_BASE_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.base_delay = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %value, "Ignoring invalid CARELINE_THINKING_BASE_MS");
        }
    }
    if let Some(value) = env("CARELINE_THINKING_JITTER_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.delay_jitter = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %value, "Ignoring invalid CARELINE_THINKING_JITTER_MS");
        }
    }
    if let Some(greeting) = env("CARELINE_GREETING") {
        config.profile.greeting = greeting;
        config.source = ConfigSource::Env;
    }
}
