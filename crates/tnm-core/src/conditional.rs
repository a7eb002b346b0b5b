use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Class that switches a conditional region to inline display.
pub const INLINE_CLASS: &str = "conditional-inline";

/// A conditional region as declared in the rendered form: the raw attribute
/// strings, before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalDecl {
    pub region_id: String,
    pub trigger: String,
    /// Comma-separated list, e.g. `"present, suspected"`.
    #[serde(default)]
    pub allowed_values: String,
    /// Whitespace-separated class list of the region element.
    #[serde(default)]
    pub class: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DisplayMode {
    Block,
    Inline,
}

/// A parsed conditional region. Built once; evaluation never re-parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalField {
    pub region_id: String,
    pub trigger_field_name: String,
    pub allowed_values: BTreeSet<String>,
    pub display_mode: DisplayMode,
}

impl ConditionalField {
    pub fn parse(decl: &ConditionalDecl) -> Self {
        let display_mode = if decl.class.split_whitespace().any(|c| c == INLINE_CLASS) {
            DisplayMode::Inline
        } else {
            DisplayMode::Block
        };

        Self {
            region_id: decl.region_id.clone(),
            trigger_field_name: decl.trigger.trim().to_string(),
            allowed_values: parse_allowed_values(&decl.allowed_values),
            display_mode,
        }
    }

    /// Empty `allowed_values` never matches.
    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values.contains(value)
    }
}

pub fn parse_allowed_values(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
