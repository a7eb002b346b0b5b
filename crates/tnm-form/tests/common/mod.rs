#![allow(dead_code)]

use tnm_core::conditional::ConditionalDecl;
use tnm_core::config::{FormConfig, MixtureConfig, SingleSelectConfig};
use tnm_core::form::{Control, FormState};
use tnm_core::taxonomy::{Taxonomy, TaxonomyEntry};

pub const SUMMARY_FIELD: &str = "histologic_summary";

pub fn entry(t: &str, tl: &str, s: &str, sl: &str, parent: &str) -> TaxonomyEntry {
    TaxonomyEntry {
        type_code: t.to_string(),
        type_label: tl.to_string(),
        subtype_code: s.to_string(),
        subtype_label: sl.to_string(),
        parent_type_code: parent.to_string(),
    }
}

/// Lung adenocarcinoma subtypes plus one subtype offered under every type.
pub fn lung_taxonomy() -> Taxonomy {
    Taxonomy::new(vec![
        entry("AD", "Adenocarcinoma", "lep", "lepidic", "AD"),
        entry("AD", "Adenocarcinoma", "aci", "acinar", "AD"),
        entry("AD", "Adenocarcinoma", "pap", "papillary", "AD"),
        entry("AD", "Adenocarcinoma", "muc", "mucinous", "AD"),
        entry("SCC", "Squamous cell carcinoma", "kera", "keratinizing", "SCC"),
        entry("LCNEC", "Large cell neuroendocrine carcinoma", "", "", ""),
        entry("", "", "nos", "NOS", ""),
    ])
}

pub fn conditional(region_id: &str, trigger: &str, allowed: &str, class: &str) -> ConditionalDecl {
    ConditionalDecl {
        region_id: region_id.to_string(),
        trigger: trigger.to_string(),
        allowed_values: allowed.to_string(),
        class: class.to_string(),
    }
}

pub fn lung_config() -> FormConfig {
    FormConfig {
        taxonomy: lung_taxonomy(),
        conditionals: vec![
            conditional("pl-detail", "pleural_invasion", "PL1, PL2, PL3", "conditional"),
            conditional("ly-detail", "lymphatic_invasion", "ly1", "conditional conditional-inline"),
            conditional("neo-detail", "neoadjuvant", "true", ""),
            conditional("never", "pleural_invasion", "", ""),
        ],
        mixture: Some(MixtureConfig::default()),
        single_select_filters: vec![SingleSelectConfig {
            type_field: "histological_type".to_string(),
            subtype_field: "histological_subtype".to_string(),
        }],
        summary_target: Some(SUMMARY_FIELD.to_string()),
        ..FormConfig::default()
    }
}

pub fn lung_form() -> FormState {
    let mut controls = vec![
        Control::radio("pleural_invasion", "PL0", true),
        Control::radio("pleural_invasion", "PL1", false),
        Control::radio("pleural_invasion", "PL2", false),
        Control::radio("pleural_invasion", "PL3", false),
        Control::text("pl_comment", ""),
        Control::select("lymphatic_invasion", "ly0"),
        Control::checkbox("neoadjuvant", false),
        Control::select("histological_type", ""),
        Control::select("histological_subtype", ""),
    ];
    for i in 1..=4 {
        controls.push(Control::select(format!("histologic_type_{i}"), ""));
        controls.push(Control::select(format!("histologic_subtype_{i}"), ""));
        controls.push(Control::number(format!("histologic_percent_{i}"), ""));
    }
    controls.push(Control::text(SUMMARY_FIELD, ""));
    FormState::new(controls)
}

pub fn type_field(row: usize) -> String {
    format!("histologic_type_{row}")
}

pub fn subtype_field(row: usize) -> String {
    format!("histologic_subtype_{row}")
}

pub fn percent_field(row: usize) -> String {
    format!("histologic_percent_{row}")
}
