//! Shared configuration loader for mdpdf.
//!
//! `defaults/mdpdf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdpdfConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdpdf_core::{MergeMode, StyleResolver};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/mdpdf.default.toml");

/// Name of the optional project-level configuration file.
pub const PROJECT_CONFIG_FILE: &str = "mdpdf.toml";

/// Top-level configuration consumed by mdpdf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdpdfConfig {
    pub convert: ConvertConfig,
    pub styles: StylesConfig,
    pub render: RenderConfig,
}

/// Defaults for a conversion run.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub style: String,
    pub page_size: String,
    pub margin: String,
    pub toc: bool,
    pub merge: bool,
}

impl ConvertConfig {
    pub fn merge_mode(&self) -> MergeMode {
        if self.merge {
            MergeMode::Merge
        } else {
            MergeMode::PageBreakPerFile
        }
    }
}

/// Where templated style definitions live.
#[derive(Debug, Clone, Deserialize)]
pub struct StylesConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub chrome_bin: String,
}

impl RenderConfig {
    /// The configured browser binary, if one was set.
    pub fn chrome_bin(&self) -> Option<PathBuf> {
        let trimmed = self.chrome_bin.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}

impl MdpdfConfig {
    /// Style resolver over the configured definitions directory and default style.
    pub fn style_resolver(&self) -> StyleResolver {
        StyleResolver::with_styles_dir(&self.styles.directory)
            .with_default_style(&self.convert.style)
    }
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
    pub fn build(self) -> Result<MdpdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdpdfConfig, ConfigError> {
    Loader::new().build()
}
