//! Derived presentation state.
//!
//! Everything here is recomputed from [`tnm_core::form::FormState`]; the page
//! applies it to whatever UI tree it renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use tnm_core::conditional::DisplayMode;
use tnm_core::taxonomy::SelectOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RegionDisplay {
    /// Fully removed from layout, not dimmed.
    Collapsed,
    Block,
    Inline,
}

impl From<DisplayMode> for RegionDisplay {
    fn from(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Block => Self::Block,
            DisplayMode::Inline => Self::Inline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegionView {
    pub display: RegionDisplay,
}

impl RegionView {
    pub fn is_visible(&self) -> bool {
        self.display != RegionDisplay::Collapsed
    }
}

/// Input mode of a mixture row's percentage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RowMode {
    /// Distinguished type: percentage enabled and required.
    ActiveRequired,
    /// No type yet: percentage enabled, optional.
    ActiveOptional,
    /// Any other type: percentage cleared, disabled and hidden.
    Suppressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PercentInput {
    pub enabled: bool,
    pub required: bool,
    pub visible: bool,
}

impl From<RowMode> for PercentInput {
    fn from(mode: RowMode) -> Self {
        match mode {
            RowMode::ActiveRequired => Self {
                enabled: true,
                required: true,
                visible: true,
            },
            RowMode::ActiveOptional => Self {
                enabled: true,
                required: false,
                visible: true,
            },
            RowMode::Suppressed => Self {
                enabled: false,
                required: false,
                visible: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RowView {
    pub visible: bool,
    pub mode: RowMode,
    /// Placeholder first, then candidates in taxonomy order.
    pub subtype_options: Vec<SelectOption>,
    pub percent: PercentInput,
}

impl Default for RowView {
    fn default() -> Self {
        Self {
            visible: true,
            mode: RowMode::ActiveOptional,
            subtype_options: vec![SelectOption::placeholder()],
            percent: RowMode::ActiveOptional.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Hint {
    pub text: String,
    pub is_warning: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MixtureAggregate {
    pub ad_total: f64,
    pub has_distinguished_rows: bool,
    /// Percentage column header; shown iff there are distinguished rows.
    pub header_visible: bool,
    pub hint: Option<Hint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ViewState {
    /// Keyed by region id.
    pub regions: BTreeMap<String, RegionView>,
    pub rows: Vec<RowView>,
    pub aggregate: MixtureAggregate,
    /// Visible options of each legacy subtype select, keyed by field name.
    pub single_select_options: BTreeMap<String, Vec<SelectOption>>,
}

impl ViewState {
    pub fn is_region_visible(&self, region_id: &str) -> bool {
        self.regions.get(region_id).is_some_and(RegionView::is_visible)
    }
}
