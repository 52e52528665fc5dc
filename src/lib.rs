//! # fancy-lexer
//!
//! A lexer for the Fancy programming language, built for syntax highlighting.
//!
//! The whole crate lives under [fancy]. Most callers only need [fancy::tokenize]:
//!
//! ```text
//! for token in fancy_lexer::fancy::tokenize("def greet: name { \"Hi \" ++ name println }") {
//!     println!("{} {:?}", token.category, token.text);
//! }
//! ```

pub mod fancy;
