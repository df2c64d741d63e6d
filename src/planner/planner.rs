//! Character list planner
//!
//! Produces a select query and a matching count query. Both share one
//! predicate so the reported total always agrees with the page contents.
//!
//! Visibility (always scoped to one universe):
//! - Admin and Owner: everything, minus hidden characters unless
//!   `include_hidden`
//! - Member with `include_hidden`: visible characters plus their own
//! - Member without `include_hidden`: visible characters only

use uuid::Uuid;

use super::ast::{CharacterFilter, LikePattern, Predicate, SortTerm};
use super::errors::{PlannerError, PlannerResult};
use crate::access::AccessContext;

/// A page of characters
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub predicate: Predicate,
    pub sort: Vec<SortTerm>,
    pub limit: u64,
    pub offset: u64,
}

/// The number of characters matching a select's predicate
#[derive(Debug, Clone, PartialEq)]
pub struct CountQuery {
    pub predicate: Predicate,
}

/// Immutable plan for one list request
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub select: SelectQuery,
    pub count: CountQuery,
}

/// Plans list queries with a fixed page size
#[derive(Debug, Clone, Copy)]
pub struct CharacterQueryPlanner {
    page_size: u64,
}

impl CharacterQueryPlanner {
    pub fn new(page_size: u64) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Plans a list request. Same inputs always give the same plan.
    pub fn plan(
        &self,
        universe_id: Uuid,
        ctx: &AccessContext,
        filter: &CharacterFilter,
    ) -> PlannerResult<QueryPlan> {
        if self.page_size == 0 {
            return Err(PlannerError::query_invalid("Page size must be positive"));
        }
        let offset = filter
            .page
            .checked_mul(self.page_size)
            .ok_or_else(|| PlannerError::page_out_of_range(filter.page, self.page_size))?;

        let predicate = Self::predicate(universe_id, ctx, filter);

        Ok(QueryPlan {
            select: SelectQuery {
                predicate: predicate.clone(),
                sort: filter.sort.terms(),
                limit: self.page_size,
                offset,
            },
            count: CountQuery { predicate },
        })
    }

    fn predicate(universe_id: Uuid, ctx: &AccessContext, filter: &CharacterFilter) -> Predicate {
        let mut clauses = vec![Predicate::UniverseIs(universe_id)];

        if ctx.is_privileged() {
            if !filter.include_hidden {
                clauses.push(Predicate::NotHidden);
            }
        } else if filter.include_hidden {
            clauses.push(Predicate::or(vec![
                Predicate::NotHidden,
                Predicate::OwnedBy(ctx.user_id),
            ]));
        } else {
            clauses.push(Predicate::NotHidden);
        }

        if let Some(pattern) = LikePattern::from_search(&filter.text) {
            clauses.push(Predicate::NameLike(pattern));
        }

        Predicate::and(clauses)
    }
}
