//! In-memory character store
//!
//! Reference implementation of [`QueryExecution`]: filter, sort, then
//! offset and limit, the way the SQL rendering of a plan would.

use std::fs;
use std::path::Path;

use super::errors::ExecutionResult;
use super::filters::PredicateFilter;
use super::sorter::ResultSorter;
use crate::character::{Character, CharacterReference};
use crate::planner::{CountQuery, SelectQuery};

/// Capability to run planned character queries
pub trait QueryExecution {
    /// Returns the page of references the query selects, in order
    fn select(&self, query: &SelectQuery) -> ExecutionResult<Vec<CharacterReference>>;

    /// Returns the number of references matching the query
    fn count(&self, query: &CountQuery) -> ExecutionResult<u64>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCharacterStore {
    references: Vec<CharacterReference>,
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_characters(characters: &[Character]) -> Self {
        Self {
            references: characters.iter().map(Character::reference).collect(),
        }
    }

    /// Loads a JSON array of characters
    pub fn load_file(path: &Path) -> ExecutionResult<Self> {
        let contents = fs::read_to_string(path)?;
        let characters: Vec<Character> = serde_json::from_str(&contents)?;
        Ok(Self::from_characters(&characters))
    }

    pub fn insert(&mut self, reference: CharacterReference) {
        self.references.push(reference);
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

impl QueryExecution for MemoryCharacterStore {
    fn select(&self, query: &SelectQuery) -> ExecutionResult<Vec<CharacterReference>> {
        let mut matched: Vec<CharacterReference> = self
            .references
            .iter()
            .filter(|r| PredicateFilter::matches(r, &query.predicate))
            .cloned()
            .collect();

        ResultSorter::sort(&mut matched, &query.sort);

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    fn count(&self, query: &CountQuery) -> ExecutionResult<u64> {
        let count = self
            .references
            .iter()
            .filter(|r| PredicateFilter::matches(r, &query.predicate))
            .count();
        Ok(count as u64)
    }
}
