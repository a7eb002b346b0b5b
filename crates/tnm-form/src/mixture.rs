//! Histologic mixture rows.
//!
//! A fixed block of rows, each a type select, a subtype select and a
//! percentage input. Percentages only make sense for the distinguished type
//! (adenocarcinoma); any other type is a single 100%-implied diagnosis and
//! may appear in at most one row.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use tnm_core::config::MixtureConfig;
use tnm_core::form::FormState;
use tnm_core::taxonomy::{SubtypeOption, Taxonomy};

use crate::error::FormError;
use crate::filter::{self, FilterStrategy};
use crate::view::{Hint, MixtureAggregate, RowMode, RowView, ViewState};
use crate::visibility::get_field_value;

/// Accepted distance from 100 for the total to count as on target.
const TOTAL_TOLERANCE: f64 = 0.5;

const HINT_INSTRUCTION: &str = "合計が100%になるよう入力してください（主組織型は最大割合から自動判定） / \
     Enter percentages so the total reaches 100% (the primary subtype is the largest share)";

/// Current values of one row, as read from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RowValues {
    pub type_value: String,
    pub subtype_value: String,
    pub percent_value: String,
}

impl RowValues {
    pub fn new(
        type_value: impl Into<String>,
        subtype_value: impl Into<String>,
        percent_value: impl Into<String>,
    ) -> Self {
        Self {
            type_value: type_value.into(),
            subtype_value: subtype_value.into(),
            percent_value: percent_value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_value.is_empty() && self.subtype_value.is_empty() && self.percent_value.is_empty()
    }

    pub fn percent(&self) -> f64 {
        parse_percent(&self.percent_value)
    }
}

#[derive(Debug, Clone)]
pub struct MixtureRow {
    pub type_field: String,
    pub subtype_field: String,
    pub percent_field: String,
    /// Unfiltered subtype list captured when the row was built.
    all_subtypes: Arc<[SubtypeOption]>,
}

impl MixtureRow {
    pub fn values(&self, state: &FormState) -> RowValues {
        RowValues {
            type_value: get_field_value(state, &self.type_field),
            subtype_value: get_field_value(state, &self.subtype_field),
            percent_value: get_field_value(state, &self.percent_field),
        }
    }

    pub fn all_subtypes(&self) -> &[SubtypeOption] {
        &self.all_subtypes
    }

    fn clear(&self, state: &mut FormState) {
        state.set_value(&self.type_field, "");
        state.set_value(&self.subtype_field, "");
        state.set_value(&self.percent_field, "");
    }
}

pub struct MixtureTable {
    rows: Vec<MixtureRow>,
    distinguished: String,
}

impl MixtureTable {
    pub fn new(config: &MixtureConfig, taxonomy: &Taxonomy, distinguished: &str) -> Result<Self, FormError> {
        if config.rows == 0 {
            return Err(FormError::EmptyMixture(config.name.clone()));
        }

        let all_subtypes: Arc<[SubtypeOption]> = taxonomy.subtype_options().into();
        let rows = (0..config.rows)
            .map(|i| MixtureRow {
                type_field: config.type_field(i),
                subtype_field: config.subtype_field(i),
                percent_field: config.percent_field(i),
                all_subtypes: Arc::clone(&all_subtypes),
            })
            .collect();

        Ok(Self {
            rows,
            distinguished: distinguished.to_string(),
        })
    }

    pub fn rows(&self) -> &[MixtureRow] {
        &self.rows
    }

    pub fn distinguished(&self) -> &str {
        &self.distinguished
    }

    /// Row whose type selector is `field`.
    pub fn type_row(&self, field: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.type_field == field)
    }

    /// Row whose percentage input is `field`.
    pub fn percent_row(&self, field: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.percent_field == field)
    }

    pub fn snapshot(&self, state: &FormState) -> Vec<RowValues> {
        self.rows.iter().map(|r| r.values(state)).collect()
    }

    /// Full recomputation, used on first paint.
    pub fn initialize(&self, state: &mut FormState, view: &mut ViewState) {
        view.rows = vec![RowView::default(); self.rows.len()];
        for index in 0..self.rows.len() {
            self.rebuild_subtype_options(index, state, view);
            self.apply_row_mode(index, state, view);
        }
        self.enforce_single_non_distinguished_row(state, view);
        self.recompute_aggregate(state, view);
    }

    /// A row's type selector changed.
    pub fn on_type_change(&self, index: usize, state: &mut FormState, view: &mut ViewState) {
        if index >= self.rows.len() {
            return;
        }
        self.rebuild_subtype_options(index, state, view);
        self.apply_row_mode(index, state, view);
        self.enforce_single_non_distinguished_row(state, view);
        self.recompute_aggregate(state, view);
    }

    /// Refilter the row's subtype options for its current type. A previous
    /// subtype that is still offered is kept; anything else becomes "no
    /// selection".
    pub fn rebuild_subtype_options(&self, index: usize, state: &mut FormState, view: &mut ViewState) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let values = row.values(state);
        let candidates = filter::candidates(&row.all_subtypes, &values.type_value);
        if candidates.is_empty() && !values.type_value.is_empty() {
            debug!(row = index, type_value = %values.type_value, "no subtypes offered for type");
        }

        let selected = filter::reselect(FilterStrategy::KeepOrClear, &values.subtype_value, &candidates);
        if selected != values.subtype_value {
            debug!(row = index, previous = %values.subtype_value, "subtype no longer offered, cleared");
            state.set_value(&row.subtype_field, &selected);
        }

        row_view(view, index).subtype_options = filter::option_list(&candidates);
    }

    pub fn apply_row_mode(&self, index: usize, state: &mut FormState, view: &mut ViewState) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let mode = compute_row_mode(&get_field_value(state, &row.type_field), &self.distinguished);
        if mode == RowMode::Suppressed && !get_field_value(state, &row.percent_field).is_empty() {
            state.set_value(&row.percent_field, "");
        }

        let slot = row_view(view, index);
        slot.mode = mode;
        slot.percent = mode.into();
    }

    /// Keep at most one row with a non-distinguished type. When such a row
    /// exists every other row is cleared and hidden; otherwise all rows are
    /// shown.
    pub fn enforce_single_non_distinguished_row(&self, state: &mut FormState, view: &mut ViewState) {
        let first_other = self.rows.iter().position(|row| {
            let type_value = get_field_value(state, &row.type_field);
            !type_value.is_empty() && type_value != self.distinguished
        });

        let Some(keep) = first_other else {
            for index in 0..self.rows.len() {
                row_view(view, index).visible = true;
            }
            return;
        };

        for (index, row) in self.rows.iter().enumerate() {
            if index == keep {
                row_view(view, index).visible = true;
                continue;
            }
            if !row.values(state).is_empty() {
                debug!(row = index, kept = keep, "clearing row alongside a non-mixture type");
            }
            row.clear(state);
            self.rebuild_subtype_options(index, state, view);
            self.apply_row_mode(index, state, view);
            row_view(view, index).visible = false;
        }
    }

    pub fn recompute_aggregate(&self, state: &FormState, view: &mut ViewState) {
        view.aggregate = compute_aggregate(&self.snapshot(state), &self.distinguished);
    }
}

fn row_view(view: &mut ViewState, index: usize) -> &mut RowView {
    if view.rows.len() <= index {
        view.rows.resize_with(index + 1, RowView::default);
    }
    &mut view.rows[index]
}

pub fn compute_row_mode(type_value: &str, distinguished: &str) -> RowMode {
    if type_value.is_empty() {
        RowMode::ActiveOptional
    } else if type_value == distinguished {
        RowMode::ActiveRequired
    } else {
        RowMode::Suppressed
    }
}

/// Sum the distinguished rows' percentages and pick the hint shown under
/// the table.
pub fn compute_aggregate(rows: &[RowValues], distinguished: &str) -> MixtureAggregate {
    let mut ad_total = 0.0;
    let mut has_distinguished_rows = false;
    for row in rows.iter().filter(|r| r.type_value == distinguished) {
        has_distinguished_rows = true;
        ad_total += row.percent();
    }

    if !has_distinguished_rows {
        return MixtureAggregate {
            ad_total,
            ..MixtureAggregate::default()
        };
    }

    let shown = display_number(ad_total);
    let hint = if ad_total == 0.0 {
        Hint {
            text: HINT_INSTRUCTION.to_string(),
            is_warning: false,
        }
    } else if is_on_target(ad_total) {
        Hint {
            text: format!("現在の合計 ≈ {shown}% / Current total ≈ {shown}%"),
            is_warning: false,
        }
    } else {
        Hint {
            text: format!(
                "現在の合計 {shown}%（100%になるよう調整してください） / \
                 Current total {shown}% (adjust to reach 100%)"
            ),
            is_warning: true,
        }
    };

    MixtureAggregate {
        ad_total,
        has_distinguished_rows,
        header_visible: true,
        hint: Some(hint),
    }
}

/// Whole-percent entry can land half a point off; both 99.5 and 100.5 count.
pub fn is_on_target(total: f64) -> bool {
    (total - 100.0).abs() <= TOTAL_TOLERANCE
}

/// Parse the leading number of a percentage entry; anything unparsable is 0.
///
/// `"70"`, `" 70.5 "` and `"70%"` all read as numbers. The raw text in the
/// field is never rewritten.
pub fn parse_percent(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    if !seen_digit {
        return 0.0;
    }
    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn display_number(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded}")
}
