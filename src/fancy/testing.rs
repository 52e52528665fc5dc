//! Testing utilities
//!
//! Factories and helpers shared by unit tests and the integration suites in `tests/`.
//!
//! Sample Sources
//!
//!     Longer Fancy programs used by the snapshot tests live in `docs/samples/`. Read them with
//!     [read_sample] rather than inlining big programs in test files, so a grammar change only
//!     needs the samples and their snapshots reviewed.

use crate::fancy::lexing::tokenize;
use crate::fancy::token::{Category, Token};
use std::path::PathBuf;

/// Build the tokens a test expects from `(category, start, end)` triples over `source`.
pub fn mk_tokens<'s>(source: &'s str, specs: &[(Category, usize, usize)]) -> Vec<Token<'s>> {
    specs
        .iter()
        .map(|&(category, start, end)| Token::new(category, start, &source[start..end]))
        .collect()
}

/// Tokenize and drop the offsets.
pub fn categorized(source: &str) -> Vec<(Category, &str)> {
    tokenize(source).map(|t| (t.category, t.text)).collect()
}

/// Path of a sample under `docs/samples/`.
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("docs")
        .join("samples")
        .join(name)
}

/// Read a sample under `docs/samples/`.
pub fn read_sample(name: &str) -> String {
    let path = sample_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read sample {}: {}", path.display(), e))
}

/// Panic unless `tokens` tile `source` exactly, in order and without gaps.
pub fn assert_tiles(source: &str, tokens: &[Token<'_>]) {
    let mut offset = 0;
    for token in tokens {
        assert_eq!(
            token.start, offset,
            "gap or overlap before {:?} at {}",
            token, offset
        );
        assert!(!token.is_empty(), "empty token {:?}", token);
        assert_eq!(&source[token.span()], token.text);
        offset = token.end;
    }
    assert_eq!(offset, source.len(), "tokens stop short of the end");
}
