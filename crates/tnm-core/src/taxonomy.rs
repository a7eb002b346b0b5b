use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One row of the histologic classification table.
///
/// `parent_type_code` links a subtype to the type it belongs to. An empty
/// parent means the subtype is offered under every type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxonomyEntry {
    pub type_code: String,
    pub type_label: String,
    #[serde(default)]
    pub subtype_code: String,
    #[serde(default)]
    pub subtype_label: String,
    #[serde(default)]
    pub parent_type_code: String,
}

/// A value/label pair as rendered into a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// The leading "no selection" entry of every subtype select.
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: "選択なし / None".to_string(),
        }
    }
}

/// A subtype option together with the type code it is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubtypeOption {
    pub code: String,
    pub label: String,
    pub parent_type_code: String,
}

impl SubtypeOption {
    pub fn is_candidate_for(&self, type_value: &str) -> bool {
        self.parent_type_code.is_empty() || self.parent_type_code == type_value
    }

    pub fn to_select_option(&self) -> SelectOption {
        SelectOption {
            value: self.code.clone(),
            label: self.label.clone(),
        }
    }
}

/// The static type → subtype table, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl Taxonomy {
    pub fn new(entries: Vec<TaxonomyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct types in first-appearance order.
    pub fn type_options(&self) -> Vec<SelectOption> {
        let mut options: Vec<SelectOption> = Vec::new();
        for entry in &self.entries {
            if entry.type_code.is_empty() || options.iter().any(|o| o.value == entry.type_code) {
                continue;
            }
            options.push(SelectOption {
                value: entry.type_code.clone(),
                label: entry.type_label.clone(),
            });
        }
        options
    }

    /// Every subtype in table order, unfiltered.
    pub fn subtype_options(&self) -> Vec<SubtypeOption> {
        self.entries
            .iter()
            .filter(|e| !e.subtype_code.is_empty())
            .map(|e| SubtypeOption {
                code: e.subtype_code.clone(),
                label: e.subtype_label.clone(),
                parent_type_code: e.parent_type_code.clone(),
            })
            .collect()
    }

    pub fn has_type(&self, code: &str) -> bool {
        !code.is_empty() && self.entries.iter().any(|e| e.type_code == code)
    }

    pub fn type_label(&self, code: &str) -> Option<&str> {
        if code.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.type_code == code && !e.type_label.is_empty())
            .map(|e| e.type_label.as_str())
    }

    /// Label of `subtype_code` as offered under `type_code`.
    pub fn subtype_label(&self, type_code: &str, subtype_code: &str) -> Option<&str> {
        if subtype_code.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| {
                e.subtype_code == subtype_code
                    && !e.subtype_label.is_empty()
                    && (e.parent_type_code.is_empty() || e.parent_type_code == type_code)
            })
            .map(|e| e.subtype_label.as_str())
    }
}
