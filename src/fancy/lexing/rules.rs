//! Rule table primitives
//!
//! A grammar is data, not code: each state owns an ordered list of [RuleDef]s, written as
//! `const` arrays so the declaration order (which decides precedence) is visible at a glance.
//! [RuleTable::compile] turns those definitions into anchored regexes once, and the scanner
//! only ever asks the table for "the rules of state X, in order".

use crate::fancy::token::Category;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;

/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Root,
    BalancedRegex,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::Root => "root",
            State::BalancedRegex => "balanced-regex",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a matching rule emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// One token for the whole match.
    Token(Category),
    /// One token per capture group, in group order. Empty groups emit nothing.
    ByGroups(&'static [Category]),
}

/// State change applied after a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Push(State),
    /// Never pops the root state.
    Pop,
}

/// Uncompiled rule, as written in a grammar.
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub action: Action,
    pub transition: Transition,
    /// Must match right after the consumed text; consumes nothing itself.
    pub lookahead: Option<&'static str>,
}

impl RuleDef {
    pub const fn new(name: &'static str, pattern: &'static str, category: Category) -> Self {
        RuleDef {
            name,
            pattern,
            action: Action::Token(category),
            transition: Transition::Stay,
            lookahead: None,
        }
    }

    pub const fn by_groups(
        name: &'static str,
        pattern: &'static str,
        categories: &'static [Category],
    ) -> Self {
        RuleDef {
            name,
            pattern,
            action: Action::ByGroups(categories),
            transition: Transition::Stay,
            lookahead: None,
        }
    }

    pub const fn push(self, state: State) -> Self {
        RuleDef {
            transition: Transition::Push(state),
            ..self
        }
    }

    pub const fn pop(self) -> Self {
        RuleDef {
            transition: Transition::Pop,
            ..self
        }
    }

    pub const fn followed_by(self, lookahead: &'static str) -> Self {
        RuleDef {
            lookahead: Some(lookahead),
            ..self
        }
    }
}

/// Outcome of a successful rule match against the remaining input.
#[derive(Debug)]
pub enum RuleMatch<'t> {
    Whole(&'t str),
    Groups(Captures<'t>),
}

impl RuleMatch<'_> {
    /// Number of bytes consumed.
    pub fn len(&self) -> usize {
        match self {
            RuleMatch::Whole(text) => text.len(),
            RuleMatch::Groups(caps) => caps.get(0).map_or(0, |m| m.end()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A compiled rule. Patterns are anchored at the start of the text they are given.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    source: &'static str,
    pattern: Regex,
    lookahead: Option<Regex>,
    action: Action,
    transition: Transition,
}

impl Rule {
    pub fn compile(def: &RuleDef) -> Result<Rule, regex::Error> {
        Ok(Rule {
            name: def.name,
            source: def.pattern,
            pattern: anchored(def.pattern)?,
            lookahead: def.lookahead.map(anchored).transpose()?,
            action: def.action,
            transition: def.transition,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The pattern as written in the grammar, without the anchor.
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Tries the rule at the very start of `rest`.
    ///
    /// Empty matches are rejected so the scanner always moves forward.
    pub fn try_match<'t>(&self, rest: &'t str) -> Option<RuleMatch<'t>> {
        let found = match self.action {
            Action::Token(_) => RuleMatch::Whole(self.pattern.find(rest)?.as_str()),
            Action::ByGroups(_) => RuleMatch::Groups(self.pattern.captures(rest)?),
        };
        if found.is_empty() {
            return None;
        }
        if let Some(lookahead) = &self.lookahead {
            if !lookahead.is_match(&rest[found.len()..]) {
                return None;
            }
        }
        Some(found)
    }
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\A(?:{})", pattern))
}

/// Compiled rules for every state of a grammar.
#[derive(Debug, Clone)]
pub struct RuleTable {
    states: HashMap<State, Vec<Rule>>,
}

impl RuleTable {
    pub fn compile(grammar: &[(State, &[RuleDef])]) -> Result<RuleTable, regex::Error> {
        let mut states = HashMap::with_capacity(grammar.len());
        for (state, defs) in grammar {
            let rules = defs.iter().map(Rule::compile).collect::<Result<Vec<_>, _>>()?;
            states.insert(*state, rules);
        }
        Ok(RuleTable { states })
    }

    /// Rules of `state` in declaration order. Unknown states have no rules.
    pub fn rules(&self, state: State) -> &[Rule] {
        self.states
            .get(&state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Declaration index of the rule called `name` in `state`.
    pub fn position(&self, state: State, name: &str) -> Option<usize> {
        self.rules(state).iter().position(|rule| rule.name() == name)
    }
}
