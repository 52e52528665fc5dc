//! Configuration for fancylex.
//!
//! Settings are resolved in three layers, later ones winning:
//!
//!     1. `defaults/fancylex.default.toml`, embedded at build time.
//!     2. A TOML file passed with `--config`.
//!     3. `key=value` settings passed with `--set`, e.g. `lexer.tabsize=4`.
//!
//! The merged tree deserializes into [FancyConfig].

use crate::fancy::error::{Error, Result};
use crate::fancy::formats::OutputFormat;
use crate::fancy::lexer::LexerOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/fancylex.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct FancyConfig {
    pub lexer: LexerOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Builds a [FancyConfig] from the defaults plus the user's layers.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply one `key=value` setting.
    ///
    /// `true`/`false` become booleans and integers become numbers; anything else is kept
    /// as a string, so `output.format=json` works without quoting.
    pub fn with_setting(mut self, setting: &str) -> Result<Self> {
        let (key, value) = setting
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| Error::InvalidSetting(setting.to_string()))?;
        self.builder = self.builder.set_override(key, setting_value(value))?;
        Ok(self)
    }

    pub fn with_settings<'a>(self, settings: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        settings
            .into_iter()
            .try_fold(self, |loader, setting| loader.with_setting(setting))
    }

    pub fn build(self) -> Result<FancyConfig> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn setting_value(raw: &str) -> ValueKind {
    if let Ok(flag) = raw.parse::<bool>() {
        ValueKind::Boolean(flag)
    } else if let Ok(number) = raw.parse::<i64>() {
        ValueKind::I64(number)
    } else {
        ValueKind::String(raw.to_string())
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<FancyConfig> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.lexer, LexerOptions::default());
        assert_eq!(config.output.format, OutputFormat::Raw);
    }

    #[test]
    fn applies_settings() {
        let config = Loader::new()
            .with_settings(["output.format=yaml", "lexer.stripall = true", "lexer.tabsize=4"])
            .expect("settings to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.lexer.stripall);
        assert_eq!(config.lexer.tabsize, 4);
        assert!(config.lexer.ensurenl);
    }

    #[test]
    fn rejects_malformed_setting() {
        for setting in ["lexer.tabsize", "=4", ""] {
            let err = Loader::new().with_setting(setting).unwrap_err();
            assert!(matches!(err, Error::InvalidSetting(ref s) if s == setting));
        }
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[lexer]\ntabsize = 8\n\n[output]\nformat = \"json\"").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.lexer.tabsize, 8);
        assert!(config.lexer.stripnl);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn settings_win_over_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[output]\nformat = \"json\"").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .with_setting("output.format=raw")
            .expect("setting to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Raw);
    }

    #[test]
    fn missing_file_fails() {
        let err = Loader::new()
            .with_file("/definitely/not/here/fancylex.toml")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Loader::new()
            .with_setting("output.format=html")
            .expect("setting to apply")
            .build()
            .is_err());
    }
}
