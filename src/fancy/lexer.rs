//! The Fancy lexer as a highlighter sees it.
//!
//!     [FancyLexer] bundles the shared grammar with per-instance [LexerOptions] and the
//!     registration metadata a host uses to pick a lexer ([LexerInfo]). Two entry points:
//!
//!     - [FancyLexer::tokenize] scans the text as given. Offsets refer to the caller's string.
//!     - [FancyLexer::get_tokens] first normalizes the text per the options (line endings,
//!       stripping, tab expansion, final newline) and returns owned tokens.

use crate::fancy::lexing::{self, Tokens};
use crate::fancy::token::{Category, Token};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// Input preprocessing applied by [FancyLexer::get_tokens].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    /// Strip leading and trailing newlines.
    pub stripnl: bool,
    /// Strip all leading and trailing whitespace. Takes precedence over `stripnl`.
    pub stripall: bool,
    /// Make sure the text ends with a newline.
    pub ensurenl: bool,
    /// Expand tabs to this width; 0 leaves them alone.
    pub tabsize: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions {
            stripnl: true,
            stripall: false,
            ensurenl: true,
            tabsize: 0,
        }
    }
}

/// Descriptive metadata used by hosts to register and select a lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexerInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
}

impl LexerInfo {
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias))
    }

    pub fn has_mimetype(&self, mimetype: &str) -> bool {
        self.mimetypes.iter().any(|m| m.eq_ignore_ascii_case(mimetype))
    }

    /// Match the file name component of `path` against the filename globs.
    pub fn matches_filename(&self, path: &str) -> bool {
        let file_name = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);
        self.filenames.iter().any(|filename| {
            Pattern::new(filename).is_ok_and(|pattern| pattern.matches(file_name))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FancyLexer {
    options: LexerOptions,
}

impl FancyLexer {
    pub const INFO: LexerInfo = LexerInfo {
        name: "Fancy",
        aliases: &["fancy", "fy"],
        filenames: &["*.fy", "*.fancypack"],
        mimetypes: &["text/x-fancysrc"],
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LexerOptions) -> Self {
        FancyLexer { options }
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    pub fn info(&self) -> &'static LexerInfo {
        &Self::INFO
    }

    /// Tokenize `text` as is. See [lexing::tokenize].
    pub fn tokenize<'s>(&self, text: &'s str) -> Tokens<'s> {
        lexing::tokenize(text)
    }

    /// Normalize `text` according to the options. Borrows when nothing changes.
    pub fn preprocess<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(text);
        if text.contains('\r') {
            text = Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"));
        }
        if self.options.stripall {
            text = trimmed(text, str::trim);
        } else if self.options.stripnl {
            text = trimmed(text, |s| s.trim_matches('\n'));
        }
        if self.options.tabsize > 0 && text.contains('\t') {
            text = Cow::Owned(expand_tabs(&text, self.options.tabsize));
        }
        if self.options.ensurenl && !text.ends_with('\n') {
            text.to_mut().push('\n');
        }
        text
    }

    /// Preprocess, then tokenize, returning tokens detached from the input.
    pub fn get_tokens(&self, text: &str) -> Vec<(Category, String)> {
        let text = self.preprocess(text);
        self.tokenize(&text).map(Token::into_owned).collect()
    }
}

fn trimmed<'a>(text: Cow<'a, str>, trim: impl Fn(&str) -> &str) -> Cow<'a, str> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(trim(s)),
        Cow::Owned(s) => Cow::Owned(trim(&s).to_string()),
    }
}

/// Column-aware tab expansion; columns restart after each line break.
fn expand_tabs(text: &str, tabsize: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = tabsize - column % tabsize;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info() {
        let info = FancyLexer::new().info();
        assert_eq!(info.name, "Fancy");
        assert!(info.has_alias("fy"));
        assert!(info.has_alias("Fancy"));
        assert!(!info.has_alias("ruby"));
        assert!(info.has_mimetype("text/x-fancysrc"));
    }

    #[test]
    fn test_matches_filename() {
        let info = FancyLexer::INFO;
        assert!(info.matches_filename("hello.fy"));
        assert!(info.matches_filename("lib/boot/rbx-compiler.fancypack"));
        assert!(!info.matches_filename("hello.fyx"));
        assert!(!info.matches_filename("hello.rb"));
        assert!(!info.matches_filename("fy"));
    }

    #[test]
    fn test_matches_filename_character_classes() {
        let info = LexerInfo {
            filenames: &["*.fy[ab]", "Fancyfile?"],
            ..FancyLexer::INFO
        };
        assert!(info.matches_filename("spec/core.fya"));
        assert!(info.matches_filename("Fancyfile2"));
        assert!(!info.matches_filename("core.fyc"));
        assert!(!info.matches_filename("core.fy[ab]"));
        assert!(!info.matches_filename("Fancyfile"));
    }

    #[test]
    fn test_default_preprocessing() {
        let lexer = FancyLexer::new();
        assert_eq!(lexer.preprocess("\n\nx := 1\n\n"), "x := 1\n");
        assert_eq!(lexer.preprocess("a\r\nb\rc"), "a\nb\nc\n");
        assert_eq!(lexer.preprocess(""), "\n");
    }

    #[test]
    fn test_preprocess_borrows_when_unchanged() {
        let lexer = FancyLexer::with_options(LexerOptions {
            stripnl: false,
            ..LexerOptions::default()
        });
        assert!(matches!(lexer.preprocess("\nx\n"), Cow::Borrowed("\nx\n")));
        assert!(matches!(lexer.preprocess("x"), Cow::Owned(_)));
    }

    #[test]
    fn test_stripall_and_tabs() {
        let lexer = FancyLexer::with_options(LexerOptions {
            stripall: true,
            ensurenl: false,
            tabsize: 4,
            ..LexerOptions::default()
        });
        assert_eq!(lexer.preprocess("  \ta\tb\n\tc  \n"), "a   b\n    c");
    }

    #[test]
    fn test_no_preprocessing() {
        let lexer = FancyLexer::with_options(LexerOptions {
            stripnl: false,
            stripall: false,
            ensurenl: false,
            tabsize: 0,
        });
        assert_eq!(lexer.preprocess("\n\tx"), "\n\tx");
    }

    #[test]
    fn test_get_tokens() {
        let tokens = FancyLexer::new().get_tokens("@@total");
        assert_eq!(
            tokens,
            vec![
                (Category::NameVariableClass, "@@total".to_string()),
                (Category::Whitespace, "\n".to_string()),
            ]
        );
    }
}
