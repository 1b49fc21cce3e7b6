//! TOML Configuration File Support
//!
//! Configuration lives at `~/.config/wal-theme/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Explicit overrides ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! - config: `$XDG_CONFIG_HOME/wal-theme/config.toml`
//! - palette cache: `$XDG_CACHE_HOME/wal/colors.json` (where pywal writes it)
//!
//! # Example Configuration
//!
//! ```toml
//! [palette]
//! cache_file = "/home/user/.cache/wal/colors.json"
//! color_names = ["black", "red", "green", "yellow", "blue", "magenta", "cyan", "white"]
//! use_builtin_on_failure = true
//! builtin = "sexy-material"
//!
//! [accents]
//! primary = "magenta"
//! secondary = "blue"
//!
//! [shades]
//! num_shades = 8
//! step_percent = 5.0
//!
//! [display]
//! reduced_colors = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::{ColorRole, ShadeConfig, BUILTIN_PALETTES};
use crate::themes::ResolveOptions;

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
    /// Value from an explicit override
    Override,
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
            Self::Override => write!(f, "override"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Palette section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteToml {
    /// Path to pywal's `colors.json`
    pub cache_file: Option<PathBuf>,

    /// Names for `color0`..`color7`
    pub color_names: Option<Vec<ColorRole>>,

    /// Fall back to a bundled palette when the cache is unusable
    pub use_builtin_on_failure: Option<bool>,

    /// Bundled palette to fall back to
    pub builtin: Option<String>,
}

/// Accent section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentsToml {
    /// Primary accent role
    pub primary: Option<ColorRole>,

    /// Secondary accent role
    pub secondary: Option<ColorRole>,
}

/// Shade section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadesToml {
    /// Shades on each side of the base color
    pub num_shades: Option<u16>,

    /// Distance between shades, in percent
    pub step_percent: Option<f64>,
}

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Ignore shades and use base colors only
    pub reduced_colors: Option<bool>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeToml {
    /// Palette configuration section
    pub palette: PaletteToml,
    /// Accent configuration section
    pub accents: AccentsToml,
    /// Shade configuration section
    pub shades: ShadesToml,
    /// Display configuration section
    pub display: DisplayToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Settings for loading, shading and resolving a palette
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeConfig {
    /// Path to pywal's `colors.json`
    pub cache_file: PathBuf,
    /// Names for the first eight positional colors
    pub color_names: Vec<ColorRole>,
    /// Main accent; must be a canonical role
    pub primary_accent: ColorRole,
    /// Second accent; must be a canonical role
    pub secondary_accent: ColorRole,
    /// Ignore shades and use base colors only
    pub reduced_colors: bool,
    /// Shade ramp parameters
    pub shades: ShadeConfig,
    /// Fall back to a bundled palette when the cache is unusable
    pub use_builtin_on_failure: bool,
    /// Bundled palette to fall back to
    pub builtin_palette: String,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Source of configuration values
    pub(crate) source: ConfigSource,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cache_file: default_cache_file(),
            color_names: ColorRole::CANONICAL.to_vec(),
            primary_accent: ColorRole::Magenta,
            secondary_accent: ColorRole::Blue,
            reduced_colors: false,
            shades: ShadeConfig::default(),
            use_builtin_on_failure: false,
            builtin_palette: "sexy-material".to_string(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ThemeConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration reading from `cache_file`
    #[must_use]
    pub fn with_cache_file(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_file: cache_file.into(),
            ..Self::default()
        }
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Options handed to the theme generators
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            primary_accent: self.primary_accent.clone(),
            secondary_accent: self.secondary_accent.clone(),
            reduced: self.reduced_colors,
        }
    }

    /// Check value ranges and role membership
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, accent) in [
            ("primary", &self.primary_accent),
            ("secondary", &self.secondary_accent),
        ] {
            if !accent.is_canonical() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} accent must be one of the 8 terminal colors, got {accent}"
                )));
            }
        }

        if self.color_names.len() != ColorRole::CANONICAL.len() {
            return Err(ConfigError::ValidationError(format!(
                "color_names must name exactly 8 colors, got {}",
                self.color_names.len()
            )));
        }

        let step = self.shades.step_percent;
        if !(step > 0.0 && step <= 100.0) {
            return Err(ConfigError::ValidationError(format!(
                "step_percent must be in (0, 100], got {step}"
            )));
        }
        if f64::from(self.shades.num_shades) * step > 100.0 {
            return Err(ConfigError::ValidationError(format!(
                "{} shades of {step}% would blend past black/white",
                self.shades.num_shades
            )));
        }

        if !BUILTIN_PALETTES
            .iter()
            .any(|(name, _)| *name == self.builtin_palette)
        {
            return Err(ConfigError::ValidationError(format!(
                "unknown built-in palette {:?}",
                self.builtin_palette
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
/// Returns `$XDG_CONFIG_HOME/wal-theme/config.toml` or
/// `~/.config/wal-theme/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wal-theme").join("config.toml"))
}

/// Get the default palette cache path
///
/// Returns `$XDG_CACHE_HOME/wal/colors.json`, falling back to
/// `~/.cache/wal/colors.json`.
#[must_use]
pub fn default_cache_file() -> PathBuf {
    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("wal")
        .join("colors.json")
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resulting configuration is invalid. A missing config file is not an error.
pub fn load_config() -> Result<ThemeConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed, or
/// if validation fails.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ThemeConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration reading environment variables through `env`
///
/// [`load_config_from_path`] passes the process environment; callers that need
/// a fixed environment (tests, embedders) pass their own lookup.
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(
    path: Option<PathBuf>,
    env: F,
) -> Result<ThemeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = ThemeConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ThemeToml = toml::from_str(&toml_content)?;
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

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ThemeConfig, toml: &ThemeToml) {
    // Palette settings
    if let Some(ref path) = toml.palette.cache_file {
        config.cache_file = expand_home(path);
    }
    if let Some(ref names) = toml.palette.color_names {
        config.color_names = names.clone();
    }
    if let Some(enabled) = toml.palette.use_builtin_on_failure {
        config.use_builtin_on_failure = enabled;
    }
    if let Some(ref name) = toml.palette.builtin {
        config.builtin_palette = name.clone();
    }

    // Accent settings
    if let Some(ref role) = toml.accents.primary {
        config.primary_accent = role.clone();
    }
    if let Some(ref role) = toml.accents.secondary {
        config.secondary_accent = role.clone();
    }

    // Shade settings
    if let Some(n) = toml.shades.num_shades {
        config.shades.num_shades = n;
    }
    if let Some(step) = toml.shades.step_percent {
        config.shades.step_percent = step;
    }

    // Display settings
    if let Some(reduced) = toml.display.reduced_colors {
        config.reduced_colors = reduced;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut ThemeConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env("WAL_THEME_CACHE_FILE") {
        config.cache_file = expand_home(Path::new(&path));
        config.source = ConfigSource::Env;
    }

    if let Some(role) = env("WAL_THEME_PRIMARY_ACCENT") {
        config.primary_accent = ColorRole::from(role);
        config.source = ConfigSource::Env;
    }

    if let Some(role) = env("WAL_THEME_SECONDARY_ACCENT") {
        config.secondary_accent = ColorRole::from(role);
        config.source = ConfigSource::Env;
    }

    if let Some(reduced) = env("WAL_THEME_REDUCED_COLORS") {
        config.reduced_colors = reduced != "0" && reduced.to_lowercase() != "false";
        config.source = ConfigSource::Env;
    }

    if let Some(n) = env("WAL_THEME_NUM_SHADES") {
        if let Ok(n) = n.parse::<u16>() {
            config.shades.num_shades = n;
            config.source = ConfigSource::Env;
        }
    }

    if let Some(step) = env("WAL_THEME_STEP_PERCENT") {
        if let Ok(step) = step.parse::<f64>() {
            config.shades.step_percent = step;
            config.source = ConfigSource::Env;
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

// =============================================================================
// Override Support
// =============================================================================

/// Builder for applying explicit overrides to configuration
///
/// Use this after [`load_config`] to apply caller-provided overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Cache file override
    pub cache_file: Option<PathBuf>,
    /// Primary accent override
    pub primary_accent: Option<ColorRole>,
    /// Secondary accent override
    pub secondary_accent: Option<ColorRole>,
    /// Reduced colors override
    pub reduced_colors: Option<bool>,
    /// Shade ramp override
    pub shades: Option<ShadeConfig>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache file override
    #[must_use]
    pub fn with_cache_file(mut self, path: PathBuf) -> Self {
        self.cache_file = Some(path);
        self
    }

    /// Set primary accent override
    #[must_use]
    pub fn with_primary_accent(mut self, role: ColorRole) -> Self {
        self.primary_accent = Some(role);
        self
    }

    /// Set secondary accent override
    #[must_use]
    pub fn with_secondary_accent(mut self, role: ColorRole) -> Self {
        self.secondary_accent = Some(role);
        self
    }

    /// Set reduced colors override
    #[must_use]
    pub fn with_reduced_colors(mut self, reduced: bool) -> Self {
        self.reduced_colors = Some(reduced);
        self
    }

    /// Set shade ramp override
    #[must_use]
    pub fn with_shades(mut self, shades: ShadeConfig) -> Self {
        self.shades = Some(shades);
        self
    }

    /// Apply overrides to a configuration
    ///
    /// The result is validated before it replaces `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the overridden configuration
    /// is invalid; `config` is left unchanged in that case.
    pub fn apply(&self, config: &mut ThemeConfig) -> Result<(), ConfigError> {
        let mut candidate = config.clone();
        self.apply_to(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }

    fn apply_to(&self, config: &mut ThemeConfig) {
        if self.cache_file.is_some()
            || self.primary_accent.is_some()
            || self.secondary_accent.is_some()
            || self.reduced_colors.is_some()
            || self.shades.is_some()
        {
            config.source = ConfigSource::Override;
        }

        if let Some(ref path) = self.cache_file {
            config.cache_file = path.clone();
        }

        if let Some(ref role) = self.primary_accent {
            config.primary_accent = role.clone();
        }

        if let Some(ref role) = self.secondary_accent {
            config.secondary_accent = role.clone();
        }

        if let Some(reduced) = self.reduced_colors {
            config.reduced_colors = reduced;
        }

        if let Some(shades) = self.shades {
            config.shades = shades;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
