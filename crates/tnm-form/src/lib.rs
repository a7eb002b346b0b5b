//! tnm-form
//!
//! The conditional form engine behind the TNM report form. Pure logic over
//! an explicit [`FormState`]: it shows and hides conditional regions,
//! filters histologic subtypes per mixture row, keeps at most one
//! non-mixture histologic type, totals the mixture percentages, and on
//! request writes a summary line into a free-text field.
//!
//! Every call runs to completion synchronously; nothing is deferred.

pub mod error;
pub mod filter;
pub mod mixture;
pub mod single_select;
pub mod summary;
pub mod view;
pub mod visibility;

use tracing::{info, warn};

use tnm_core::config::FormConfig;
use tnm_core::form::FormState;
use tnm_core::taxonomy::Taxonomy;

use error::FormError;
use mixture::{MixtureTable, RowValues};
use single_select::SingleSelectFilter;
use view::ViewState;
use visibility::VisibilityController;

pub struct FormEngine {
    taxonomy: Taxonomy,
    distinguished: String,
    visibility: VisibilityController,
    mixture: Option<MixtureTable>,
    single_selects: Vec<SingleSelectFilter>,
    summary_target: Option<String>,
}

impl FormEngine {
    pub fn new(config: &FormConfig) -> Result<Self, FormError> {
        let distinguished = config.distinguished_type_code.clone();
        if !config.taxonomy.is_empty() && !config.taxonomy.has_type(&distinguished) {
            // Every row then behaves as a non-mixture type.
            warn!(code = %distinguished, "distinguished type code not found in taxonomy");
        }

        let visibility = VisibilityController::new(&config.conditionals)?;
        let mixture = config
            .mixture
            .as_ref()
            .map(|m| MixtureTable::new(m, &config.taxonomy, &distinguished))
            .transpose()?;
        let single_selects = config
            .single_select_filters
            .iter()
            .map(|s| SingleSelectFilter::new(s, &config.taxonomy))
            .collect();

        info!(
            conditionals = visibility.fields().len(),
            mixture_rows = mixture.as_ref().map_or(0, |m| m.rows().len()),
            "form engine ready"
        );

        Ok(Self {
            taxonomy: config.taxonomy.clone(),
            distinguished,
            visibility,
            mixture,
            single_selects,
            summary_target: config.summary_target.clone(),
        })
    }

    /// Build from a raw JSON form config, migrating older versions first.
    pub fn from_json_str(contents: &str) -> Result<Self, FormError> {
        let config = FormConfig::from_json_str(contents)?;
        Self::new(&config)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub fn mixture(&self) -> Option<&MixtureTable> {
        self.mixture.as_ref()
    }

    /// First paint: compute every piece of derived state.
    pub fn initialize(&self, state: &mut FormState) -> ViewState {
        let mut view = ViewState::default();
        self.visibility.recompute(state, &mut view);
        for filter in &self.single_selects {
            filter.apply(state, &mut view);
        }
        if let Some(mixture) = &self.mixture {
            mixture.initialize(state, &mut view);
        }
        view
    }

    /// Field `name` changed. Recomputes only what depends on it.
    pub fn on_change(&self, state: &mut FormState, view: &mut ViewState, name: &str) {
        self.visibility.recompute_for(name, state, view);

        for filter in self.single_selects.iter().filter(|f| f.type_field == name) {
            filter.apply(state, view);
        }

        if let Some(mixture) = &self.mixture {
            if let Some(index) = mixture.type_row(name) {
                mixture.on_type_change(index, state, view);
            } else if mixture.percent_row(name).is_some() {
                mixture.recompute_aggregate(state, view);
            }
        }
    }

    /// Set a field and process the change notification in one step.
    pub fn set_value(&self, state: &mut FormState, view: &mut ViewState, name: &str, value: &str) {
        state.set_value(name, value);
        self.on_change(state, view, name);
    }

    pub fn mixture_snapshot(&self, state: &FormState) -> Vec<RowValues> {
        self.mixture
            .as_ref()
            .map(|m| m.snapshot(state))
            .unwrap_or_default()
    }

    pub fn build_summary(&self, state: &FormState) -> String {
        summary::build_summary(&self.mixture_snapshot(state), &self.taxonomy, &self.distinguished)
    }

    /// "Fill from mixture": write the summary into `target`.
    ///
    /// An empty summary leaves the target untouched and returns `None`.
    pub fn fill_from_mixture(&self, state: &mut FormState, target: &str) -> Option<String> {
        let summary = self.build_summary(state);
        if summary.is_empty() {
            return None;
        }
        if !state.set_value(target, &summary) {
            warn!(field = %target, "summary target field not present");
            return None;
        }
        Some(summary)
    }

    /// [`fill_from_mixture`](Self::fill_from_mixture) into the configured
    /// summary target.
    pub fn fill_summary_target(&self, state: &mut FormState) -> Option<String> {
        let target = self.summary_target.as_deref()?;
        self.fill_from_mixture(state, target)
    }
}

/// Flatten the form into the name/value pairs a browser would submit.
///
/// Radio buttons and checkboxes submit only when checked; every other
/// control always submits. Values of hidden regions are submitted as they
/// stand.
pub fn submission(state: &FormState) -> Vec<(String, String)> {
    state
        .controls()
        .iter()
        .filter(|c| !c.kind.is_checkable() || c.checked)
        .map(|c| (c.name.clone(), c.value.clone()))
        .collect()
}
