//! Output formats for token streams.
//!
//! - `raw`: one `Token.<Category>\t<quoted text>` line per token, easy to diff.
//! - `json` / `yaml`: a list of `{category, start, end, text}` records.

use crate::fancy::error::{Error, Result};
use crate::fancy::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Raw,
    Json,
    Yaml,
}

pub const OUTPUT_FORMATS: &[OutputFormat] =
    &[OutputFormat::Raw, OutputFormat::Json, OutputFormat::Yaml];

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Raw => "One token per line: category, tab, quoted text",
            OutputFormat::Json => "JSON array of {category, start, end, text}",
            OutputFormat::Yaml => "YAML sequence of {category, start, end, text}",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OUTPUT_FORMATS
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

pub fn render(format: OutputFormat, tokens: &[Token<'_>]) -> Result<String> {
    match format {
        OutputFormat::Raw => Ok(to_raw(tokens)),
        OutputFormat::Json => to_json(tokens),
        OutputFormat::Yaml => to_yaml(tokens),
    }
}

pub fn to_raw(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        // writing into a String cannot fail
        let _ = writeln!(out, "Token.{}\t{:?}", token.category, token.text);
    }
    out
}

pub fn to_json(tokens: &[Token<'_>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

pub fn to_yaml(tokens: &[Token<'_>]) -> Result<String> {
    Ok(serde_yaml::to_string(tokens)?)
}
