//! Older forms: one type select driving one subtype select.
//!
//! Unlike mixture rows, a subtype that is no longer offered is replaced by
//! the first offered subtype rather than cleared.

use std::sync::Arc;

use tracing::debug;

use tnm_core::config::SingleSelectConfig;
use tnm_core::form::FormState;
use tnm_core::taxonomy::{SubtypeOption, Taxonomy};

use crate::filter::{self, FilterStrategy};
use crate::view::ViewState;
use crate::visibility::get_field_value;

#[derive(Debug, Clone)]
pub struct SingleSelectFilter {
    pub type_field: String,
    pub subtype_field: String,
    all_subtypes: Arc<[SubtypeOption]>,
}

impl SingleSelectFilter {
    pub fn new(config: &SingleSelectConfig, taxonomy: &Taxonomy) -> Self {
        Self {
            type_field: config.type_field.clone(),
            subtype_field: config.subtype_field.clone(),
            all_subtypes: taxonomy.subtype_options().into(),
        }
    }

    pub fn apply(&self, state: &mut FormState, view: &mut ViewState) {
        let type_value = get_field_value(state, &self.type_field);
        let previous = get_field_value(state, &self.subtype_field);
        let candidates = filter::candidates(&self.all_subtypes, &type_value);

        let selected = filter::reselect(FilterStrategy::AutoSelectFirst, &previous, &candidates);
        if selected != previous {
            debug!(field = %self.subtype_field, previous = %previous, selected = %selected, "subtype auto-selected");
            state.set_value(&self.subtype_field, &selected);
        }

        view.single_select_options
            .insert(self.subtype_field.clone(), filter::option_list(&candidates));
    }
}
