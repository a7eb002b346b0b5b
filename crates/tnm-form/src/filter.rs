//! Type → subtype option filtering.
//!
//! Both filtering paths share the candidate rule but differ in what happens
//! to a selection that is no longer a candidate, so they stay two separate
//! strategies.

use serde::{Deserialize, Serialize};

use tnm_core::taxonomy::{SelectOption, SubtypeOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    /// Mixture rows: keep the previous subtype if still offered, otherwise
    /// fall back to the placeholder.
    KeepOrClear,
    /// Single type/subtype select pair: keep the previous subtype if still
    /// offered, otherwise select the first candidate.
    AutoSelectFirst,
}

/// Subtypes offered under `type_value`, in taxonomy order.
pub fn candidates<'a>(all: &'a [SubtypeOption], type_value: &str) -> Vec<&'a SubtypeOption> {
    all.iter().filter(|o| o.is_candidate_for(type_value)).collect()
}

/// The selection to show after the candidate list changed.
pub fn reselect(strategy: FilterStrategy, previous: &str, candidates: &[&SubtypeOption]) -> String {
    if !previous.is_empty() && candidates.iter().any(|c| c.code == previous) {
        return previous.to_string();
    }
    match strategy {
        FilterStrategy::KeepOrClear => String::new(),
        FilterStrategy::AutoSelectFirst => candidates
            .first()
            .map(|c| c.code.clone())
            .unwrap_or_default(),
    }
}

/// The rendered option list: placeholder followed by the candidates.
pub fn option_list(candidates: &[&SubtypeOption]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder())
        .chain(candidates.iter().map(|c| c.to_select_option()))
        .collect()
}
