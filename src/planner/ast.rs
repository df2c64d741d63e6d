//! Character list query structures
//!
//! Defines the filter a list request carries and the plan vocabulary
//! (predicates, sort terms, name patterns) the planner emits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The two list orderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// By display name, hidden names last
    #[default]
    Nominal,
    /// By effective surname, then last name, then first name; hidden or
    /// incomplete names last
    Lexicographic,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Nominal => "nominal",
            SortMode::Lexicographic => "lexicographic",
        }
    }

    /// Sort terms implementing this mode; `Id` is always last
    pub fn terms(&self) -> Vec<SortTerm> {
        match self {
            SortMode::Nominal => vec![SortTerm::NameHiddenLast, SortTerm::Name, SortTerm::Id],
            SortMode::Lexicographic => vec![
                SortTerm::IncompleteNameLast,
                SortTerm::EffectiveSurname,
                SortTerm::LastName,
                SortTerm::FirstName,
                SortTerm::Id,
            ],
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nominal" | "nom" => Ok(SortMode::Nominal),
            "lexicographic" | "lex" => Ok(SortMode::Lexicographic),
            other => Err(format!("unknown sort mode '{}'", other)),
        }
    }
}

/// List request parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterFilter {
    /// Name search; empty matches everything
    pub text: String,
    /// Zero-based page number
    pub page: u64,
    pub include_hidden: bool,
    pub sort: SortMode,
}

impl Default for CharacterFilter {
    fn default() -> Self {
        Self {
            text: String::new(),
            page: 0,
            include_hidden: true,
            sort: SortMode::Nominal,
        }
    }
}

impl CharacterFilter {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn with_include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    /// `%`
    AnyRun,
    /// `_`
    AnyOne,
    Literal(char),
}

/// Case-insensitive SQL `LIKE` pattern.
///
/// `%` matches any run of characters, `_` exactly one, `\` escapes the
/// next character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    pattern: String,
}

impl LikePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Builds the pattern for a name search.
    ///
    /// Returns `None` for blank searches. Wildcard characters typed by the
    /// user are matched literally; whitespace runs become `%` and the whole
    /// is wrapped in `%...%`.
    pub fn from_search(text: &str) -> Option<Self> {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|word| {
                let mut escaped = String::with_capacity(word.len());
                for c in word.chars() {
                    if matches!(c, '%' | '_' | '\\') {
                        escaped.push('\\');
                    }
                    escaped.push(c);
                }
                escaped
            })
            .collect();

        if words.is_empty() {
            return None;
        }
        Some(Self::new(format!("%{}%", words.join("%"))))
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    fn tokens(&self) -> Vec<LikeToken> {
        let mut tokens = Vec::new();
        let lowered = self.pattern.to_lowercase();
        let mut chars = lowered.chars();
        while let Some(c) = chars.next() {
            tokens.push(match c {
                '%' => LikeToken::AnyRun,
                '_' => LikeToken::AnyOne,
                '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
                c => LikeToken::Literal(c),
            });
        }
        tokens
    }

    /// Whether `candidate` matches, ignoring case
    pub fn matches(&self, candidate: &str) -> bool {
        let tokens = self.tokens();
        let text: Vec<char> = candidate.to_lowercase().chars().collect();

        let (mut t, mut p) = (0, 0);
        // Position of the last `%` and the text index it was tried at
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match tokens.get(p) {
                Some(LikeToken::AnyRun) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some(LikeToken::AnyOne) => {
                    t += 1;
                    p += 1;
                }
                Some(LikeToken::Literal(c)) if *c == text[t] => {
                    t += 1;
                    p += 1;
                }
                _ => match backtrack {
                    Some((star, from)) => {
                        p = star + 1;
                        t = from + 1;
                        backtrack = Some((star, from + 1));
                    }
                    None => return false,
                },
            }
        }

        tokens[p..].iter().all(|token| *token == LikeToken::AnyRun)
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Row filter over character references
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Belongs to the universe
    UniverseIs(Uuid),
    /// Not globally hidden
    NotHidden,
    /// Owned by the user
    OwnedBy(Uuid),
    /// Display name matches, ignoring case
    NameLike(LikePattern),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn and(predicates: Vec<Predicate>) -> Self {
        Predicate::And(predicates)
    }

    pub fn or(predicates: Vec<Predicate>) -> Self {
        Predicate::Or(predicates)
    }
}

/// One ascending sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortTerm {
    /// Visible names before hidden names
    NameHiddenLast,
    /// Complete visible names before hidden names and names missing both
    /// first and last name
    IncompleteNameLast,
    Name,
    /// Preferred name if set, else last name
    EffectiveSurname,
    LastName,
    FirstName,
    /// Final tiebreak
    Id,
}

impl SortTerm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortTerm::NameHiddenLast => "name_hidden_last",
            SortTerm::IncompleteNameLast => "incomplete_name_last",
            SortTerm::Name => "name",
            SortTerm::EffectiveSurname => "effective_surname",
            SortTerm::LastName => "last_name",
            SortTerm::FirstName => "first_name",
            SortTerm::Id => "id",
        }
    }
}
