//! Shared configuration loader for the mrkdwn toolchain.
//!
//! `defaults/mrkdwn.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MrkdwnConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mrkdwn_babel::{ConversionOptions, ItalicStyle};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mrkdwn.default.toml");

/// Top-level configuration consumed by mrkdwn applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MrkdwnConfig {
    pub convert: ConvertConfig,
    pub export: ExportConfig,
}

/// Mirrors the knobs exposed by the conversion pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub links: bool,
    pub mentions: bool,
    pub emphasis: bool,
    pub protect_code: bool,
    pub italic_style: ItalicStyle,
    pub mention_prefixes: Vec<char>,
}

impl From<ConvertConfig> for ConversionOptions {
    fn from(config: ConvertConfig) -> Self {
        ConversionOptions {
            links: config.links,
            mentions: config.mentions,
            emphasis: config.emphasis,
            protect_code: config.protect_code,
            italic_style: config.italic_style,
            mention_prefixes: config.mention_prefixes,
        }
    }
}

impl From<&ConvertConfig> for ConversionOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConversionOptions {
            links: config.links,
            mentions: config.mentions,
            emphasis: config.emphasis,
            protect_code: config.protect_code,
            italic_style: config.italic_style,
            mention_prefixes: config.mention_prefixes.clone(),
        }
    }
}

/// Controls the JSON written by `mrkdwn export`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MrkdwnConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MrkdwnConfig, ConfigError> {
    Loader::new().build()
}
