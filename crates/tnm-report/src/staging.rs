//! TNM descriptors and stage grouping (Japanese General Rules for Clinical
//! and Pathological Study of Cancer).

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::error::ReportError;

pub const T_STAGES: &[(&str, &str)] = &[
    ("TX", "Primary tumor cannot be assessed"),
    ("T0", "No evidence of primary tumor"),
    ("Tis", "Carcinoma in situ"),
    ("T1", "Tumor limited to mucosa or submucosa"),
    ("T1a", "Tumor invades mucosa"),
    ("T1b", "Tumor invades submucosa"),
    ("T2", "Tumor invades muscularis propria"),
    ("T3", "Tumor invades subserosa or adventitia"),
    ("T4", "Tumor directly invades other organs or structures"),
    ("T4a", "Tumor perforates visceral peritoneum"),
    ("T4b", "Tumor directly invades other organs or structures"),
];

pub const N_STAGES: &[(&str, &str)] = &[
    ("NX", "Regional lymph nodes cannot be assessed"),
    ("N0", "No regional lymph node metastasis"),
    ("N1", "Metastasis in 1-2 regional lymph nodes"),
    ("N2", "Metastasis in 3-6 regional lymph nodes"),
    ("N3", "Metastasis in 7 or more regional lymph nodes"),
    ("N3a", "Metastasis in 7-15 regional lymph nodes"),
    ("N3b", "Metastasis in 16 or more regional lymph nodes"),
];

pub const M_STAGES: &[(&str, &str)] = &[
    ("MX", "Distant metastasis cannot be assessed"),
    ("M0", "No distant metastasis"),
    ("M1", "Distant metastasis present"),
];

pub const HISTOLOGICAL_TYPES: &[(&str, &str)] = &[
    ("adenocarcinoma", "Adenocarcinoma"),
    ("squamous", "Squamous cell carcinoma"),
    ("adenosquamous", "Adenosquamous carcinoma"),
    ("undifferentiated", "Undifferentiated carcinoma"),
    ("other", "Other histological type"),
];

pub const DIFFERENTIATION_GRADES: &[(&str, &str)] = &[
    ("G1", "Well differentiated"),
    ("G2", "Moderately differentiated"),
    ("G3", "Poorly differentiated"),
    ("G4", "Undifferentiated"),
    ("GX", "Grade cannot be assessed"),
];

pub const LYMPHATIC_INVASION: &[(&str, &str)] = &[
    ("ly0", "No lymphatic invasion"),
    ("ly1", "Lymphatic invasion present"),
    ("lyX", "Lymphatic invasion cannot be assessed"),
];

pub const VENOUS_INVASION: &[(&str, &str)] = &[
    ("v0", "No venous invasion"),
    ("v1", "Venous invasion present"),
    ("vX", "Venous invasion cannot be assessed"),
];

pub const MARGIN_STATUS: &[(&str, &str)] = &[
    ("R0", "No residual tumor"),
    ("R1", "Microscopic residual tumor"),
    ("R2", "Macroscopic residual tumor"),
    ("RX", "Presence of residual tumor cannot be assessed"),
];

pub const UNKNOWN_STAGE: &str = "Stage ?";

pub fn describe(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, d)| *d)
}

/// Simplified stage grouping. Real grouping depends on the organ; use a
/// [`StageTable`] when the form config provides one.
pub fn stage_group(t: &str, n: &str, m: &str) -> &'static str {
    const T1: &[&str] = &["T1", "T1a", "T1b"];
    const T3_T4: &[&str] = &["T3", "T4", "T4a", "T4b"];
    const T_VALID: &[&str] = &["T1", "T1a", "T1b", "T2", "T3", "T4", "T4a", "T4b"];
    const N_POSITIVE: &[&str] = &["N1", "N2", "N3", "N3a", "N3b"];

    if m == "M1" {
        return "Stage IV";
    }
    if t == "Tis" && n == "N0" {
        return "Stage 0";
    }
    if T1.contains(&t) && n == "N0" {
        return "Stage I";
    }
    if t == "T2" && n == "N0" {
        return "Stage IIA";
    }
    if T3_T4.contains(&t) && n == "N0" {
        return "Stage IIB";
    }
    if T_VALID.contains(&t) && N_POSITIVE.contains(&n) {
        return "Stage III";
    }
    "Stage cannot be determined"
}

/// Drop the pathological `p` prefix: `pT1a` → `T1a`.
pub fn normalize_component(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.strip_prefix('p').unwrap_or(trimmed)
}

/// Organ-specific `"T,N,M"` → stage lookup.
///
/// Exact keys win. Otherwise patterns containing `*` are tried in
/// declaration order, `*` matching any run of characters.
#[derive(Debug, Clone, Default)]
pub struct StageTable {
    exact: HashMap<String, String>,
    wildcards: Vec<(Regex, String)>,
}

impl StageTable {
    pub fn new<I, K, V>(entries: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::default();
        for (pattern, stage) in entries {
            let pattern = pattern.into();
            let stage = stage.into();
            if pattern.contains('*') {
                let regex = format!("^{}$", regex::escape(&pattern).replace("\\*", ".*"));
                table.wildcards.push((Regex::new(&regex)?, stage));
            } else {
                table.exact.insert(pattern, stage);
            }
        }
        Ok(table)
    }

    /// Parse a JSON object, keeping its key order for wildcard priority.
    pub fn from_json_str(contents: &str) -> Result<Self, ReportError> {
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let map = json.as_object().ok_or(ReportError::InvalidStageTable)?;
        let mut entries = Vec::with_capacity(map.len());
        for (pattern, stage) in map {
            let stage = stage.as_str().ok_or(ReportError::InvalidStageTable)?;
            entries.push((pattern.clone(), stage.to_string()));
        }
        Self::new(entries)
    }

    pub fn derive_stage(&self, pt: &str, pn: &str, pm: &str) -> String {
        let key = [pt, pn, pm]
            .map(normalize_component)
            .join(",");

        if let Some(stage) = self.exact.get(&key).filter(|s| !s.is_empty()) {
            return stage.clone();
        }

        for (pattern, stage) in &self.wildcards {
            if pattern.is_match(&key) {
                debug!(key = %key, pattern = %pattern, "stage matched wildcard");
                return stage.clone();
            }
        }

        UNKNOWN_STAGE.to_string()
    }
}
