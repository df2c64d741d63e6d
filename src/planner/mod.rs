//! Query planner for character lists
//!
//! # Design Principles
//!
//! - Deterministic: same inputs give the same plan
//! - Bounded: every select carries a page-size limit
//! - Consistent: the count query reuses the select's predicate
//! - Scoped: every plan is limited to one universe and the actor's
//!   visibility
//!
//! Plans are storage-agnostic; [`SelectQuery::to_sql`] renders them for
//! PostgreSQL and [`crate::executor`] runs them in memory.

mod ast;
mod errors;
mod planner;
mod sql;

pub use ast::{CharacterFilter, LikePattern, Predicate, SortMode, SortTerm};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use planner::{CharacterQueryPlanner, CountQuery, QueryPlan, SelectQuery};
pub use sql::SqlParam;
