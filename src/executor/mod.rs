//! Query execution for character lists
//!
//! [`QueryExecution`] is the seam to whatever actually stores characters.
//! [`MemoryCharacterStore`] implements it in memory.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter references by the plan's predicate
//! 2. Sort by the plan's terms, id last
//! 3. Apply offset, then limit

mod errors;
mod filters;
mod memory;
mod sorter;

pub use errors::{ExecutionError, ExecutionResult};
pub use filters::PredicateFilter;
pub use memory::{MemoryCharacterStore, QueryExecution};
pub use sorter::ResultSorter;
