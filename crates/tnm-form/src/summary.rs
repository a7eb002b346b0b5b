//! Free-text summaries synthesized from form state on explicit request.

use std::collections::BTreeSet;

use tnm_core::form::FormState;
use tnm_core::taxonomy::Taxonomy;

use crate::mixture::RowValues;
use crate::visibility::get_field_value;

const POSITIVE_SUFFIX: &str = "_positive";
const TOTAL_SUFFIX: &str = "_total";

/// Reduce the mixture rows to one line, e.g.
/// `"Adenocarcinoma, papillary (主 70%), mucinous 30%"`.
///
/// Distinguished rows with a positive percentage come first: the type
/// label, then the largest share marked as primary (first row wins a tie),
/// then the remaining shares in row order. Rows of any other type follow as
/// `"<type> <subtype>"`. Labels missing from the taxonomy are left out.
/// Returns `""` when no row contributes.
pub fn build_summary(rows: &[RowValues], taxonomy: &Taxonomy, distinguished: &str) -> String {
    let filled: Vec<&RowValues> = rows.iter().filter(|r| !r.is_empty()).collect();

    let distinguished_rows: Vec<(&RowValues, f64)> = filled
        .iter()
        .filter(|r| r.type_value == distinguished)
        .map(|r| (*r, r.percent()))
        .filter(|(_, pct)| *pct > 0.0)
        .collect();

    let other_rows = filled
        .iter()
        .filter(|r| !r.type_value.is_empty() && r.type_value != distinguished);

    let mut parts: Vec<String> = Vec::new();

    if !distinguished_rows.is_empty() {
        let mut primary = 0;
        for (i, (_, pct)) in distinguished_rows.iter().enumerate() {
            if *pct > distinguished_rows[primary].1 {
                primary = i;
            }
        }

        let (row, pct) = distinguished_rows[primary];
        if let Some(type_label) = taxonomy.type_label(&row.type_value) {
            parts.push(type_label.to_string());
        }
        match taxonomy.subtype_label(&row.type_value, &row.subtype_value) {
            Some(label) => parts.push(format!("{label} (主 {}%)", whole_percent(pct))),
            None => parts.push(format!("(主 {}%)", whole_percent(pct))),
        }

        for (i, (row, pct)) in distinguished_rows.iter().enumerate() {
            if i == primary {
                continue;
            }
            match taxonomy.subtype_label(&row.type_value, &row.subtype_value) {
                Some(label) => parts.push(format!("{label} {}%", whole_percent(*pct))),
                None => parts.push(format!("{}%", whole_percent(*pct))),
            }
        }
    }

    for row in other_rows {
        let type_label = taxonomy.type_label(&row.type_value);
        let subtype_label = taxonomy.subtype_label(&row.type_value, &row.subtype_value);
        match (type_label, subtype_label) {
            (Some(t), Some(s)) => parts.push(format!("{t} {s}")),
            (Some(label), None) | (None, Some(label)) => parts.push(label.to_string()),
            (None, None) => {}
        }
    }

    parts.join(", ")
}

/// Nearest whole percent, halves rounded away from zero.
fn whole_percent(pct: f64) -> i64 {
    pct.round() as i64
}

/// Summarize lymph node stations as `"<station> (<positive>/<total>)"`.
///
/// Every field named `<base>_positive` with a value contributes, in name
/// order. The total comes from `<base>_total`, or `?` when empty. A leading
/// `LN` is dropped from the station label.
pub fn build_nodal_summary(state: &FormState) -> String {
    let names: BTreeSet<&str> = state.field_names().into_iter().collect();

    let mut parts = Vec::new();
    for name in names {
        let Some(base) = name.strip_suffix(POSITIVE_SUFFIX) else {
            continue;
        };
        let positive = get_field_value(state, name);
        let positive = positive.trim();
        if positive.is_empty() {
            continue;
        }

        let total = get_field_value(state, &format!("{base}{TOTAL_SUFFIX}"));
        let total = match total.trim() {
            "" => "?",
            t => t,
        };

        let label = base.strip_prefix("LN").unwrap_or(base);
        parts.push(format!("{label} ({positive}/{total})"));
    }

    parts.join(", ")
}
