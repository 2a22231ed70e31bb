//! Configuration for the parser and its output formats
//!
//! `defaults/puddlejumper.default.toml` is embedded into the library so the
//! documented defaults and runtime behavior stay in sync. Callers layer their
//! own files and overrides on top with [`Loader`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/puddlejumper.default.toml");

/// Top-level configuration consumed by puddlejumper applications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PuddlejumperConfig {
    pub parser: ParserConfig,
    pub formatting: FormattingConfig,
}

/// Options read by the core parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Columns a tab counts for when measuring indentation
    pub tab_width: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { tab_width: 8 }
    }
}

/// Options for the pretty printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FormattingConfig {
    /// Spaces emitted per nesting level
    pub indent_width: usize,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl PuddlejumperConfig {
    /// Reject widths of zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widths = [
            ("parser.tab_width", self.parser.tab_width),
            ("formatting.indent_width", self.formatting.indent_width),
        ];
        match widths.iter().find(|(_, width)| *width == 0) {
            Some((key, _)) => Err(ConfigError::Message(format!("{} must be at least 1", key))),
            None => Ok(()),
        }
    }
}

/// Stack of configuration layers; later layers win.
///
/// The bottom layer is always the embedded defaults. Files are TOML.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML file that is skipped when absent, like a project-local
    /// `puddlejumper.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin the tab width above every file layer.
    pub fn with_tab_width(self, tab_width: u32) -> Result<Self, ConfigError> {
        self.set_override("parser.tab_width", i64::from(tab_width))
    }

    /// Pin any dotted key, e.g. `formatting.indent_width`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer into a validated [`PuddlejumperConfig`].
    pub fn build(self) -> Result<PuddlejumperConfig, ConfigError> {
        let config: PuddlejumperConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<PuddlejumperConfig, ConfigError> {
    Loader::new().build()
}
