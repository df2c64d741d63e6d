//! Result sorting for in-memory execution
//!
//! Every sort ends with the id tiebreak, so the ordering is total.

use std::cmp::Ordering;

use crate::character::CharacterReference;
use crate::planner::SortTerm;

/// Sorts character references
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts references by the given ascending terms
    pub fn sort(references: &mut [CharacterReference], terms: &[SortTerm]) {
        references.sort_by(|a, b| Self::compare(a, b, terms));
    }

    /// Compares two references term by term, falling back to id
    pub fn compare(a: &CharacterReference, b: &CharacterReference, terms: &[SortTerm]) -> Ordering {
        terms
            .iter()
            .map(|term| Self::compare_term(a, b, *term))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }

    fn compare_term(a: &CharacterReference, b: &CharacterReference, term: SortTerm) -> Ordering {
        match term {
            SortTerm::NameHiddenLast => a.name_hidden.cmp(&b.name_hidden),
            SortTerm::IncompleteNameLast => Self::incomplete(a).cmp(&Self::incomplete(b)),
            SortTerm::Name => a.name.cmp(&b.name),
            SortTerm::EffectiveSurname => a.effective_surname().cmp(b.effective_surname()),
            SortTerm::LastName => a.last_name().cmp(b.last_name()),
            SortTerm::FirstName => a.first_name().cmp(b.first_name()),
            SortTerm::Id => a.id.cmp(&b.id),
        }
    }

    /// Hidden names and names missing both first and last name
    fn incomplete(reference: &CharacterReference) -> bool {
        reference.name_hidden || (reference.first_name().is_empty() && reference.last_name().is_empty())
    }
}
