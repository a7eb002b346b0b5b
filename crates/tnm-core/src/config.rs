use serde::{Deserialize, Serialize};

use crate::conditional::ConditionalDecl;
use crate::error::CoreError;
use crate::taxonomy::{Taxonomy, TaxonomyEntry};

/// Current config version. Bump this when changing the shape and add the
/// matching step to [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Type code for which percentage-weighted mixtures apply (adenocarcinoma).
pub const DEFAULT_DISTINGUISHED_TYPE: &str = "AD";

const DEFAULT_MIXTURE_NAME: &str = "histologic";
const DEFAULT_MIXTURE_ROWS: usize = 4;

/// Static description of one organ form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Schema version. Missing or 0 = the nested `histologic_mix` shape.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_distinguished")]
    pub distinguished_type_code: String,
    #[serde(default)]
    pub taxonomy: Taxonomy,
    #[serde(default)]
    pub conditionals: Vec<ConditionalDecl>,
    #[serde(default)]
    pub mixture: Option<MixtureConfig>,
    /// Older forms with one type select driving one subtype select.
    #[serde(default)]
    pub single_select_filters: Vec<SingleSelectConfig>,
    /// Free-text field that "fill from mixture" writes into.
    #[serde(default)]
    pub summary_target: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            distinguished_type_code: default_distinguished(),
            taxonomy: Taxonomy::default(),
            conditionals: Vec::new(),
            mixture: None,
            single_select_filters: Vec::new(),
            summary_target: None,
        }
    }
}

/// The fixed-size block of histologic mixture rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixtureConfig {
    #[serde(default = "default_mixture_name")]
    pub name: String,
    #[serde(default = "default_mixture_rows")]
    pub rows: usize,
}

impl Default for MixtureConfig {
    fn default() -> Self {
        Self {
            name: default_mixture_name(),
            rows: DEFAULT_MIXTURE_ROWS,
        }
    }
}

impl MixtureConfig {
    // Rows are numbered from 1 in field names.
    pub fn type_field(&self, row: usize) -> String {
        format!("{}_type_{}", self.name, row + 1)
    }

    pub fn subtype_field(&self, row: usize) -> String {
        format!("{}_subtype_{}", self.name, row + 1)
    }

    pub fn percent_field(&self, row: usize) -> String {
        format!("{}_percent_{}", self.name, row + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSelectConfig {
    pub type_field: String,
    pub subtype_field: String,
}

fn default_distinguished() -> String {
    DEFAULT_DISTINGUISHED_TYPE.to_string()
}

fn default_mixture_name() -> String {
    DEFAULT_MIXTURE_NAME.to_string()
}

fn default_mixture_rows() -> usize {
    DEFAULT_MIXTURE_ROWS
}

impl FormConfig {
    pub fn from_json_str(contents: &str) -> Result<Self, CoreError> {
        let json: serde_json::Value = serde_json::from_str(contents)?;
        Self::from_value(json)
    }

    /// Migrate a raw JSON config to [`CURRENT_VERSION`] and deserialize it.
    pub fn from_value(json: serde_json::Value) -> Result<Self, CoreError> {
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        let config: FormConfig = serde_json::from_value(migrated)?;
        Ok(config)
    }
}

/// Version 0 histologic mix field: types with nested subtypes.
#[derive(Debug, Deserialize)]
struct LegacyMixField {
    #[serde(default = "default_mixture_rows")]
    rows: usize,
    #[serde(default)]
    types: Vec<LegacyType>,
}

#[derive(Debug, Deserialize)]
struct LegacyType {
    #[serde(default)]
    code: String,
    label: Option<String>,
    #[serde(default)]
    subtypes: Vec<LegacySubtype>,
}

#[derive(Debug, Deserialize)]
struct LegacySubtype {
    #[serde(default)]
    code: String,
    label: Option<String>,
}

fn flatten_legacy_types(types: Vec<LegacyType>) -> Vec<TaxonomyEntry> {
    let mut entries = Vec::new();
    for t in types.into_iter().filter(|t| !t.code.is_empty()) {
        let type_label = t.label.unwrap_or_else(|| t.code.clone());
        let subtypes: Vec<_> = t.subtypes.into_iter().filter(|s| !s.code.is_empty()).collect();

        if subtypes.is_empty() {
            entries.push(TaxonomyEntry {
                type_code: t.code,
                type_label,
                subtype_code: String::new(),
                subtype_label: String::new(),
                parent_type_code: String::new(),
            });
            continue;
        }

        for s in subtypes {
            entries.push(TaxonomyEntry {
                type_code: t.code.clone(),
                type_label: type_label.clone(),
                subtype_label: s.label.unwrap_or_else(|| s.code.clone()),
                subtype_code: s.code,
                parent_type_code: t.code.clone(),
            });
        }
    }
    entries
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedConfigVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: flatten `histologic_mix.types[].subtypes[]` into `taxonomy`
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(CoreError::NotAnObject)?;
        if let Some(mix) = obj.remove("histologic_mix") {
            let legacy: LegacyMixField = serde_json::from_value(mix)?;
            let entries = flatten_legacy_types(legacy.types);
            obj.entry("taxonomy")
                .or_insert(serde_json::to_value(&entries)?);
            obj.entry("mixture").or_insert(serde_json::to_value(MixtureConfig {
                rows: legacy.rows,
                ..MixtureConfig::default()
            })?);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated form config v0 → v1 (flattened histologic_mix)");
    }

    Ok(json)
}
