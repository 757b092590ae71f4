//! Case-insensitive substring matching of option labels.
//!
//! Built on nucleo-matcher's exact substring atoms rather than its fuzzy
//! scoring: a label either contains the needle or it does not.

use std::fmt;
use std::str::FromStr;

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::Deserialize;

use crate::error::ConfigError;

/// How a search string is compared against labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Split the query on whitespace; every token must occur somewhere in
    /// the label, in any order. A matching group label reveals all of the
    /// group's options.
    #[default]
    Tokens,
    /// The whole query must occur in the label as one substring. Group
    /// labels are not searched.
    Substring,
}

impl MatchStrategy {
    /// Whether a group label match makes every option of the group visible.
    pub fn cascades_group_label(self) -> bool {
        matches!(self, MatchStrategy::Tokens)
    }
}

impl FromStr for MatchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tokens" => Ok(MatchStrategy::Tokens),
            "substring" => Ok(MatchStrategy::Substring),
            other => Err(ConfigError::InvalidStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
enum Compiled {
    Everything,
    Tokens(Vec<Atom>),
    Substring(Atom),
}

/// Plain case-insensitive substring needle. Backslashes and the `^`, `$`,
/// `!` and `'` prefixes are taken literally.
fn substring_atom(needle: &str) -> Atom {
    Atom::new(
        needle,
        CaseMatching::Ignore,
        Normalization::Never,
        AtomKind::Substring,
        false,
    )
}

/// A search string compiled for one strategy.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    raw: String,
    strategy: MatchStrategy,
    compiled: Compiled,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>, strategy: MatchStrategy) -> Self {
        let raw = raw.into();
        let compiled = if raw.is_empty() {
            Compiled::Everything
        } else {
            match strategy {
                // Whitespace-only queries yield no tokens.
                MatchStrategy::Tokens if raw.trim().is_empty() => Compiled::Everything,
                MatchStrategy::Tokens => {
                    Compiled::Tokens(raw.split_whitespace().map(substring_atom).collect())
                }
                MatchStrategy::Substring => Compiled::Substring(substring_atom(&raw)),
            }
        };
        Self {
            raw,
            strategy,
            compiled,
        }
    }

    /// The query text as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// True when the query matches every label.
    pub fn matches_everything(&self) -> bool {
        matches!(self.compiled, Compiled::Everything)
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new("", MatchStrategy::default())
    }
}

/// Reusable matching engine.
///
/// Holds the nucleo matcher and its UTF-32 scratch buffer so a filter pass
/// over many labels does not allocate per label.
pub struct TextMatcher {
    matcher: Matcher,
    haystack_buf: Vec<char>,
}

impl TextMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            haystack_buf: Vec::new(),
        }
    }

    /// Whether `text` matches `query`.
    pub fn matches(&mut self, text: &str, query: &SearchQuery) -> bool {
        match &query.compiled {
            Compiled::Everything => true,
            Compiled::Tokens(atoms) => {
                let haystack = Utf32Str::new(text, &mut self.haystack_buf);
                atoms
                    .iter()
                    .all(|atom| atom.score(haystack, &mut self.matcher).is_some())
            }
            Compiled::Substring(atom) => {
                let haystack = Utf32Str::new(text, &mut self.haystack_buf);
                atom.score(haystack, &mut self.matcher).is_some()
            }
        }
    }
}

impl Default for TextMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextMatcher").finish_non_exhaustive()
    }
}

/// One-off match of `text` against `query` using [`MatchStrategy::Tokens`].
///
/// ```
/// assert!(nmd_select::matches("Mercedes Benz", "benz merc"));
/// assert!(!nmd_select::matches("Mercedes Benz", "benz audi"));
/// ```
pub fn matches(text: &str, query: &str) -> bool {
    TextMatcher::new().matches(text, &SearchQuery::new(query, MatchStrategy::Tokens))
}
