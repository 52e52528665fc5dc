//! Errors raised around the tokenizer.
//!
//! Tokenizing never fails; these cover rendering, configuration and reading input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown output format '{0}' (available: raw, json, yaml)")]
    UnknownFormat(String),

    #[error("invalid setting '{0}' (expected key=value, e.g. lexer.tabsize=4)")]
    InvalidSetting(String),

    #[error("failed to render tokens as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render tokens as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
