//! Predicate filtering for in-memory execution
//!
//! Evaluates the planner's predicate tree against character references.

use crate::character::CharacterReference;
use crate::planner::Predicate;

/// Evaluates predicates against references
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a reference satisfies the predicate
    pub fn matches(reference: &CharacterReference, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::UniverseIs(id) => reference.universe_id == *id,
            Predicate::NotHidden => !reference.hidden,
            Predicate::OwnedBy(id) => reference.owner_id == *id,
            Predicate::NameLike(pattern) => pattern.matches(&reference.name),
            // Empty conjunction matches everything, empty disjunction nothing
            Predicate::And(clauses) => clauses.iter().all(|c| Self::matches(reference, c)),
            Predicate::Or(clauses) => clauses.iter().any(|c| Self::matches(reference, c)),
        }
    }
}
