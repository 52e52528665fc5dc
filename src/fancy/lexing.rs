//! Lexing
//!
//! This module runs the Fancy grammar over source text and produces classified tokens.
//!
//! Structure:
//!     The grammar lives in [grammar] as plain data: one ordered list of rules per state.
//!     The rule primitives (states, actions, transitions, compiled tables) live in [rules].
//!     This module holds the scanner itself, [Tokens], which walks the input left to right.
//!
//! Scanning
//!
//!     At each offset the scanner takes the state on top of its stack and tries that state's
//!     rules in declaration order. The first rule that matches at the offset wins, even if a
//!     later rule would match more text. The winning rule emits one token (or one per capture
//!     group), the offset moves past the match, and the rule's transition pushes or pops a
//!     state. The root state is never popped.
//!
//!     When nothing matches, the scanner recovers instead of failing:
//!     - a newline resets the stack to `root` and is emitted as whitespace, so an unterminated
//!       regex literal cannot swallow the rest of the file;
//!     - any other character is emitted alone as an `Error` token.
//!
//!     Every step consumes at least one character, so scanning always terminates and the
//!     emitted tokens tile the input exactly: concatenating their texts gives back the source.

pub mod grammar;
pub mod rules;

use crate::fancy::token::{Category, Token};
use grammar::FANCY_RULES;
use rules::{Action, RuleMatch, RuleTable, State, Transition};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Tokenize Fancy source.
///
/// The returned iterator is lazy. Cloning it snapshots the scan, and calling `tokenize`
/// again on the same text restarts from the beginning.
pub fn tokenize(source: &str) -> Tokens<'_> {
    Tokens::new(&FANCY_RULES, source)
}

/// Rebuild source text from a token stream.
pub fn detokenize<'s>(tokens: impl IntoIterator<Item = Token<'s>>) -> String {
    tokens.into_iter().map(|token| token.text).collect()
}

/// Lazy token stream over one source string.
#[derive(Debug, Clone)]
pub struct Tokens<'s> {
    table: &'s RuleTable,
    source: &'s str,
    offset: usize,
    stack: Vec<State>,
    pending: VecDeque<Token<'s>>,
}

impl<'s> Tokens<'s> {
    /// Scan `source` with an arbitrary rule table, starting in `root`.
    pub fn new(table: &'s RuleTable, source: &'s str) -> Self {
        Tokens {
            table,
            source,
            offset: 0,
            stack: vec![State::Root],
            pending: VecDeque::new(),
        }
    }

    /// Current scanner state.
    pub fn state(&self) -> State {
        self.stack.last().copied().unwrap_or(State::Root)
    }

    /// Number of states on the stack, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Byte offset of the next unscanned character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn step(&mut self) {
        let source = self.source;
        let table = self.table;
        let rest = &source[self.offset..];
        let state = self.state();

        for rule in table.rules(state) {
            if let Some(found) = rule.try_match(rest) {
                let consumed = found.len();
                self.emit_match(rule.action(), found);
                self.offset += consumed;
                self.apply(rule.transition());
                return;
            }
        }

        self.recover(rest, state);
    }

    fn emit_match(&mut self, action: Action, found: RuleMatch<'s>) {
        match (action, found) {
            (Action::Token(category), RuleMatch::Whole(text)) => {
                self.push_token(category, 0, text);
            }
            (Action::ByGroups(categories), RuleMatch::Groups(caps)) => {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let mut covered = 0;
                for (index, category) in categories.iter().enumerate() {
                    let group = match caps.get(index + 1) {
                        Some(group) if !group.is_empty() && group.start() >= covered => group,
                        _ => continue,
                    };
                    if group.start() > covered {
                        self.push_token(Category::Text, covered, &whole[covered..group.start()]);
                    }
                    self.push_token(*category, group.start(), group.as_str());
                    covered = group.end();
                }
                if covered < whole.len() {
                    self.push_token(Category::Text, covered, &whole[covered..]);
                }
            }
            (Action::Token(category), RuleMatch::Groups(caps)) => {
                let text = caps.get(0).map_or("", |m| m.as_str());
                self.push_token(category, 0, text);
            }
            (Action::ByGroups(_), RuleMatch::Whole(text)) => {
                self.push_token(Category::Text, 0, text);
            }
        }
    }

    /// Queue a token at `relative` bytes past the current offset.
    fn push_token(&mut self, category: Category, relative: usize, text: &'s str) {
        self.pending
            .push_back(Token::new(category, self.offset + relative, text));
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Push(state) => {
                trace!(offset = self.offset, state = state.as_str(), "push state");
                self.stack.push(state);
            }
            Transition::Pop => {
                if self.stack.len() > 1 {
                    let popped = self.stack.pop();
                    trace!(offset = self.offset, state = ?popped, "pop state");
                }
            }
        }
    }

    fn recover(&mut self, rest: &'s str, state: State) {
        let Some(ch) = rest.chars().next() else {
            return;
        };
        let text = &rest[..ch.len_utf8()];
        if ch == '\n' {
            if self.stack.len() > 1 {
                trace!(
                    offset = self.offset,
                    state = state.as_str(),
                    "newline resets state stack"
                );
                self.stack.truncate(1);
            }
            self.push_token(Category::Whitespace, 0, text);
        } else {
            debug!(
                offset = self.offset,
                state = state.as_str(),
                character = ?ch,
                "no rule matched, emitting error token"
            );
            self.push_token(Category::Error, 0, text);
        }
        self.offset += text.len();
    }
}

impl<'s> Iterator for Tokens<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Token<'s>> {
        while self.pending.is_empty() {
            if self.offset >= self.source.len() {
                return None;
            }
            self.step();
        }
        self.pending.pop_front()
    }
}

impl FusedIterator for Tokens<'_> {}
