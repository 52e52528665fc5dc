//! Token types produced by the Fancy tokenizer.
//!
//!     Every token is a contiguous span of the input classified with a [Category]. Categories
//!     form a small hierarchy (e.g. `Name.Variable.Instance` is a `Name.Variable`, which is a
//!     `Name`), so a renderer that only knows how to color `Name` can still handle every kind
//!     of name by walking [Category::parent] until it finds something it knows.
//!
//!     Tokens borrow their text from the source they were produced from. They are created by
//!     the scanner in [lexing](crate::fancy::lexing) and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The fixed output alphabet of the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Text")]
    Text,
    #[serde(rename = "Text.Whitespace")]
    Whitespace,
    #[serde(rename = "Error")]
    Error,
    #[serde(rename = "Comment")]
    Comment,
    #[serde(rename = "Comment.Single")]
    CommentSingle,
    #[serde(rename = "Keyword")]
    Keyword,
    #[serde(rename = "Operator")]
    Operator,
    #[serde(rename = "Punctuation")]
    Punctuation,
    #[serde(rename = "Name")]
    Name,
    #[serde(rename = "Name.Constant")]
    NameConstant,
    #[serde(rename = "Name.Builtin")]
    NameBuiltin,
    #[serde(rename = "Name.Function")]
    NameFunction,
    #[serde(rename = "Name.Variable")]
    NameVariable,
    #[serde(rename = "Name.Variable.Instance")]
    NameVariableInstance,
    #[serde(rename = "Name.Variable.Class")]
    NameVariableClass,
    #[serde(rename = "String")]
    String,
    #[serde(rename = "String.Regex")]
    StringRegex,
    #[serde(rename = "String.Symbol")]
    StringSymbol,
    #[serde(rename = "Number")]
    Number,
    #[serde(rename = "Number.Integer")]
    NumberInteger,
    #[serde(rename = "Number.Float")]
    NumberFloat,
    #[serde(rename = "Number.Oct")]
    NumberOct,
    #[serde(rename = "Number.Hex")]
    NumberHex,
    #[serde(rename = "Number.Bin")]
    NumberBin,
}

pub const ALL_CATEGORIES: &[Category] = &[
    Category::Text,
    Category::Whitespace,
    Category::Error,
    Category::Comment,
    Category::CommentSingle,
    Category::Keyword,
    Category::Operator,
    Category::Punctuation,
    Category::Name,
    Category::NameConstant,
    Category::NameBuiltin,
    Category::NameFunction,
    Category::NameVariable,
    Category::NameVariableInstance,
    Category::NameVariableClass,
    Category::String,
    Category::StringRegex,
    Category::StringSymbol,
    Category::Number,
    Category::NumberInteger,
    Category::NumberFloat,
    Category::NumberOct,
    Category::NumberHex,
    Category::NumberBin,
];

impl Category {
    /// Dotted name of the category, e.g. `Name.Variable.Instance`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Whitespace => "Text.Whitespace",
            Category::Error => "Error",
            Category::Comment => "Comment",
            Category::CommentSingle => "Comment.Single",
            Category::Keyword => "Keyword",
            Category::Operator => "Operator",
            Category::Punctuation => "Punctuation",
            Category::Name => "Name",
            Category::NameConstant => "Name.Constant",
            Category::NameBuiltin => "Name.Builtin",
            Category::NameFunction => "Name.Function",
            Category::NameVariable => "Name.Variable",
            Category::NameVariableInstance => "Name.Variable.Instance",
            Category::NameVariableClass => "Name.Variable.Class",
            Category::String => "String",
            Category::StringRegex => "String.Regex",
            Category::StringSymbol => "String.Symbol",
            Category::Number => "Number",
            Category::NumberInteger => "Number.Integer",
            Category::NumberFloat => "Number.Float",
            Category::NumberOct => "Number.Oct",
            Category::NumberHex => "Number.Hex",
            Category::NumberBin => "Number.Bin",
        }
    }

    /// The enclosing category, or `None` for top-level categories.
    pub fn parent(self) -> Option<Category> {
        match self {
            Category::Whitespace => Some(Category::Text),
            Category::CommentSingle => Some(Category::Comment),
            Category::NameConstant
            | Category::NameBuiltin
            | Category::NameFunction
            | Category::NameVariable => Some(Category::Name),
            Category::NameVariableInstance | Category::NameVariableClass => {
                Some(Category::NameVariable)
            }
            Category::StringRegex | Category::StringSymbol => Some(Category::String),
            Category::NumberInteger
            | Category::NumberFloat
            | Category::NumberOct
            | Category::NumberHex
            | Category::NumberBin => Some(Category::Number),
            Category::Text
            | Category::Error
            | Category::Comment
            | Category::Keyword
            | Category::Operator
            | Category::Punctuation
            | Category::Name
            | Category::String
            | Category::Number => None,
        }
    }

    /// True if `self` is `other` or lies anywhere below it in the hierarchy.
    pub fn is_subtype_of(self, other: Category) -> bool {
        self.ancestors().any(|c| c == other)
    }

    /// Iterates from `self` up to its top-level category, inclusive.
    pub fn ancestors(self) -> impl Iterator<Item = Category> {
        std::iter::successors(Some(self), |c| c.parent())
    }

    /// Looks a category up by its dotted name. Accepts an optional `Token.` prefix.
    pub fn from_name(name: &str) -> Option<Category> {
        let name = name.strip_prefix("Token.").unwrap_or(name);
        ALL_CATEGORIES.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'s> {
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub text: &'s str,
}

impl<'s> Token<'s> {
    pub fn new(category: Category, start: usize, text: &'s str) -> Self {
        Token {
            category,
            start,
            end: start + text.len(),
            text,
        }
    }

    /// Byte range of the token in the source.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Detaches the token from its source.
    pub fn into_owned(self) -> (Category, String) {
        (self.category, self.text.to_string())
    }
}
