//! The Fancy grammar
//!
//! Two states. `root` covers ordinary code; `balanced-regex` is entered after a regex
//! opener (`m` before a delimiter, or the pattern half of `s{..}{..}`) and matches exactly
//! one delimited literal before popping back.
//!
//! Rule order is load-bearing. The order within `root` is:
//! 1. whitespace
//! 2. regex literals (`s{..}`, `/../`, `m{..}`), before anything that could claim `/`
//! 3. comments, symbols, strings (triple-quoted before plain)
//! 4. keywords, then the `self`/`nil`/... constants
//! 5. builtin class names, before any generic name rule
//! 6. function labels (`name:`), operator runs, then single-character punctuation
//! 7. constant names, `@ivar`, `@@cvar`, bare sigils, identifiers
//! 8. numbers: octal, hex, binary, integer, float, plain integer
//!
//! The integer-like number rules also capture whitespace and a trailing `/` or `?` as
//! separate tokens, so `10 / 2` never opens a regex and `0x1F?` stays a number.

use super::rules::{RuleDef, RuleTable, State};
use crate::fancy::token::Category;
use once_cell::sync::Lazy;

const OCT_SUFFIX: &[Category] = &[Category::NumberOct, Category::Whitespace, Category::Operator];
const HEX_SUFFIX: &[Category] = &[Category::NumberHex, Category::Whitespace, Category::Operator];
const BIN_SUFFIX: &[Category] = &[Category::NumberBin, Category::Whitespace, Category::Operator];
const INT_SUFFIX: &[Category] = &[
    Category::NumberInteger,
    Category::Whitespace,
    Category::Operator,
];

pub const ROOT: &[RuleDef] = &[
    RuleDef::new("whitespace", r"\s+", Category::Whitespace),
    // substitution patterns; the replacement half is lexed in balanced-regex
    RuleDef::new(
        "substitution-brace",
        r"s\{(\\\\|\\[^\\]|[^}\\])*\}\s*",
        Category::StringRegex,
    )
    .push(State::BalancedRegex),
    RuleDef::new(
        "substitution-angle",
        r"s<(\\\\|\\[^\\]|[^>\\])*>\s*",
        Category::StringRegex,
    )
    .push(State::BalancedRegex),
    RuleDef::new(
        "substitution-bracket",
        r"s\[(\\\\|\\[^\\]|[^\]\\])*\]\s*",
        Category::StringRegex,
    )
    .push(State::BalancedRegex),
    RuleDef::new(
        "substitution-paren",
        r"s\((\\\\|\\[^\\]|[^)\\])*\)\s*",
        Category::StringRegex,
    )
    .push(State::BalancedRegex),
    RuleDef::new(
        "regex-slash",
        r"m?/(\\\\|\\[^\\]|[^/\\\n])*/[gcimosx]*",
        Category::StringRegex,
    ),
    RuleDef::new("regex-open", r"m", Category::StringRegex)
        .followed_by(r"[/!\\{<\[(@%$]")
        .push(State::BalancedRegex),
    RuleDef::new("comment", r"#[^\n]*(?:\n|\z)", Category::CommentSingle),
    RuleDef::new("symbol", r"'([^'\s\[\](){},]+|\[\])", Category::StringSymbol),
    RuleDef::new(
        "string-triple",
        r#""""(\\\\|\\[^\\]|[^\\])*?""""#,
        Category::String,
    ),
    RuleDef::new("string", r#""(\\\\|\\[^\\]|[^"\\])*""#, Category::String),
    // `->` and `=>` stay keywords when followed by a space, so no `\b` after them.
    RuleDef::new(
        "keyword",
        r"(def|class|try|catch|finally|retry|return|return_local|match|case)\b|->|=>",
        Category::Keyword,
    ),
    RuleDef::new(
        "constant",
        r"(self|super|nil|false|true)\b",
        Category::NameConstant,
    ),
    RuleDef::new(
        "builtin",
        r"(Object|Array|Hash|Directory|File|Class|String|Number|Enumerable|FancyEnumerable|Block|TrueClass|NilClass|FalseClass|Tuple|Symbol|Stack|Set|FancySpec|Method|Package|Range)\b",
        Category::NameBuiltin,
    ),
    RuleDef::new(
        "function",
        r"[a-zA-Z]([a-zA-Z0-9_]|[-+?!=*/^><%])*:",
        Category::NameFunction,
    ),
    RuleDef::new("operator", r"[-+*/~,<>=&!?%^\[\]]+", Category::Operator),
    RuleDef::new("punctuation", r"[(){};,/?|:\\]", Category::Punctuation),
    RuleDef::new("constant-name", r"[A-Z][a-zA-Z0-9_]*", Category::NameConstant),
    RuleDef::new(
        "instance-variable",
        r"@[a-zA-Z_][a-zA-Z0-9_]*",
        Category::NameVariableInstance,
    ),
    RuleDef::new(
        "class-variable",
        r"@@[a-zA-Z_][a-zA-Z0-9_]*",
        Category::NameVariableClass,
    ),
    RuleDef::new("sigil", r"@@?", Category::Operator),
    RuleDef::new("identifier", r"[a-zA-Z_][a-zA-Z0-9_]*", Category::Name),
    RuleDef::by_groups("octal", r"(0[oO]?[0-7]+(?:_[0-7]+)*)(\s*)([/?])?", OCT_SUFFIX),
    RuleDef::by_groups(
        "hex",
        r"(0[xX][0-9A-Fa-f]+(?:_[0-9A-Fa-f]+)*)(\s*)([/?])?",
        HEX_SUFFIX,
    ),
    RuleDef::by_groups("binary", r"(0[bB][01]+(?:_[01]+)*)(\s*)([/?])?", BIN_SUFFIX),
    RuleDef::by_groups("integer", r"(\d+(?:_\d+)*)(\s*)([/?])?", INT_SUFFIX),
    RuleDef::new(
        "float",
        r"(\d+\.?\d*|\d*\.\d+)([eE][+-]?[0-9]+)?",
        Category::NumberFloat,
    ),
    RuleDef::new("integer-plain", r"\d+", Category::NumberInteger),
];

pub const BALANCED_REGEX: &[RuleDef] = &[
    RuleDef::new(
        "slash",
        r"/(\\\\|\\[^\\]|[^/\\])*/[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "bang",
        r"!(\\\\|\\[^\\]|[^!\\])*![egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "backslash",
        r"\\(\\\\|[^\\])*\\[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "brace",
        r"\{(\\\\|\\[^\\]|[^}\\])*\}[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "angle",
        r"<(\\\\|\\[^\\]|[^>\\])*>[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "bracket",
        r"\[(\\\\|\\[^\\]|[^\]\\])*\][egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "paren",
        r"\((\\\\|\\[^\\]|[^)\\])*\)[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "at",
        r"@(\\\\|\\[^\\]|[^@\\])*@[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "percent",
        r"%(\\\\|\\[^\\]|[^%\\])*%[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
    RuleDef::new(
        "dollar",
        r"\$(\\\\|\\[^\\]|[^$\\])*\$[egimosx]*",
        Category::StringRegex,
    )
    .pop(),
];

/// The compiled Fancy grammar, shared by every tokenization.
pub static FANCY_RULES: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::compile(&[(State::Root, ROOT), (State::BalancedRegex, BALANCED_REGEX)])
        .expect("Fancy grammar patterns are valid regexes")
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fancy::lexing::rules::{Action, Transition};

    fn root_position(name: &str) -> usize {
        FANCY_RULES
            .position(State::Root, name)
            .unwrap_or_else(|| panic!("no root rule named {}", name))
    }

    #[test]
    fn test_grammar_compiles() {
        assert_eq!(FANCY_RULES.rules(State::Root).len(), ROOT.len());
        assert_eq!(
            FANCY_RULES.rules(State::BalancedRegex).len(),
            BALANCED_REGEX.len()
        );
    }

    #[test]
    fn test_rule_names_are_unique_per_state() {
        for defs in [ROOT, BALANCED_REGEX] {
            let mut names: Vec<&str> = defs.iter().map(|d| d.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), defs.len());
        }
    }

    #[test]
    fn test_regex_literals_precede_operators_and_punctuation() {
        for regex_rule in ["regex-slash", "regex-open", "substitution-brace"] {
            assert!(root_position(regex_rule) < root_position("operator"));
            assert!(root_position(regex_rule) < root_position("punctuation"));
        }
    }

    #[test]
    fn test_function_labels_sit_between_names_and_operators() {
        assert!(root_position("function") < root_position("operator"));
        assert!(root_position("operator") < root_position("instance-variable"));
        assert!(root_position("operator") < root_position("class-variable"));
    }

    #[test]
    fn test_operator_runs_precede_punctuation() {
        assert!(root_position("operator") < root_position("punctuation"));
        assert!(root_position("punctuation") < root_position("constant-name"));
    }

    #[test]
    fn test_builtins_precede_generic_names() {
        assert!(root_position("builtin") < root_position("constant-name"));
        assert!(root_position("builtin") < root_position("identifier"));
        assert!(root_position("keyword") < root_position("identifier"));
    }

    #[test]
    fn test_sigil_variables_precede_identifiers() {
        assert!(root_position("instance-variable") < root_position("identifier"));
        assert!(root_position("class-variable") < root_position("identifier"));
        assert!(root_position("class-variable") < root_position("sigil"));
    }

    #[test]
    fn test_number_rule_order() {
        let order = ["octal", "hex", "binary", "integer", "float", "integer-plain"];
        let positions: Vec<usize> = order.iter().map(|name| root_position(name)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
    }

    #[test]
    fn test_balanced_regex_rules_all_pop() {
        for rule in FANCY_RULES.rules(State::BalancedRegex) {
            assert_eq!(rule.transition(), Transition::Pop, "{}", rule.name());
            assert_eq!(rule.action(), Action::Token(Category::StringRegex));
        }
    }

    #[test]
    fn test_only_openers_push() {
        let pushing: Vec<&str> = FANCY_RULES
            .rules(State::Root)
            .iter()
            .filter(|rule| matches!(rule.transition(), Transition::Push(_)))
            .map(|rule| rule.name())
            .collect();
        assert_eq!(
            pushing,
            vec![
                "substitution-brace",
                "substitution-angle",
                "substitution-bracket",
                "substitution-paren",
                "regex-open",
            ]
        );
    }
}
