//! Fancy
//!
//! A syntax-highlighting tokenizer for the Fancy programming language.
//!
//! Layout
//!
//!     - [token]: the category taxonomy and the token type.
//!     - [lexing]: the scanner, its rule primitives and the Fancy grammar.
//!     - [lexer]: [FancyLexer], input preprocessing options and registration metadata.
//!     - [formats]: raw / JSON / YAML renderings of a token stream.
//!     - [config]: layered configuration for the command-line tool.
//!     - [error]: errors of the fallible surfaces (rendering, configuration, I/O).
//!     - [testing]: factories and sample access shared by the test suites.
//!
//!     Tokenizing is total: any input produces tokens that cover it exactly, with unknown
//!     characters classified as `Error` instead of aborting the scan.

pub mod config;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod lexing;
pub mod testing;
pub mod token;

pub use lexer::{FancyLexer, LexerInfo, LexerOptions};
pub use lexing::{detokenize, tokenize, Tokens};
pub use token::{Category, Token};
