use tnm_form::mixture::{compute_aggregate, compute_row_mode, is_on_target, parse_percent, RowValues};
use tnm_form::view::RowMode;

fn ad(percent: &str) -> RowValues {
    RowValues::new("AD", "", percent)
}

#[test]
fn row_mode_depends_on_type() {
    assert_eq!(compute_row_mode("AD", "AD"), RowMode::ActiveRequired);
    assert_eq!(compute_row_mode("", "AD"), RowMode::ActiveOptional);
    assert_eq!(compute_row_mode("SCC", "AD"), RowMode::Suppressed);
}

#[test]
fn percent_parsing_is_lenient() {
    assert_eq!(parse_percent("70"), 70.0);
    assert_eq!(parse_percent(" 12.5 "), 12.5);
    assert_eq!(parse_percent("70%"), 70.0);
    assert_eq!(parse_percent(".5"), 0.5);
    assert_eq!(parse_percent("-5"), -5.0);
    assert_eq!(parse_percent(""), 0.0);
    assert_eq!(parse_percent("abc"), 0.0);
    assert_eq!(parse_percent("."), 0.0);
    assert_eq!(parse_percent("-"), 0.0);
}

#[test]
fn total_sums_distinguished_rows_only() {
    let rows = vec![
        ad("40"),
        ad("not a number"),
        RowValues::new("SCC", "", "50"),
        RowValues::new("", "", "10"),
        ad("25.5"),
    ];
    let aggregate = compute_aggregate(&rows, "AD");
    assert_eq!(aggregate.ad_total, 65.5);
    assert!(aggregate.has_distinguished_rows);
    assert!(aggregate.header_visible);
}

#[test]
fn no_distinguished_rows_hides_percentage_ui() {
    let rows = vec![RowValues::new("SCC", "kera", ""), RowValues::default()];
    let aggregate = compute_aggregate(&rows, "AD");
    assert!(!aggregate.has_distinguished_rows);
    assert!(!aggregate.header_visible);
    assert!(aggregate.hint.is_none());
    assert_eq!(aggregate.ad_total, 0.0);
}

#[test]
fn distinguished_row_without_percentage_shows_instruction() {
    let aggregate = compute_aggregate(&[ad("")], "AD");
    let hint = aggregate.hint.unwrap();
    assert!(!hint.is_warning);
    assert!(hint.text.contains("Enter percentages"));
}

#[test]
fn hint_threshold_boundaries() {
    for total in ["99.5", "100", "100.5"] {
        let hint = compute_aggregate(&[ad(total)], "AD").hint.unwrap();
        assert!(!hint.is_warning, "{total}");
        assert!(hint.text.contains(&format!("≈ {total}%")), "{total}: {}", hint.text);
    }
    for total in ["99.4", "100.6", "50", "150"] {
        let hint = compute_aggregate(&[ad(total)], "AD").hint.unwrap();
        assert!(hint.is_warning, "{total}");
        assert!(hint.text.contains("adjust to reach 100%"), "{total}");
    }
}

#[test]
fn split_entries_reach_target() {
    let rows = vec![ad("60"), ad("39.5")];
    let aggregate = compute_aggregate(&rows, "AD");
    assert_eq!(aggregate.ad_total, 99.5);
    assert!(!aggregate.hint.unwrap().is_warning);
    assert!(is_on_target(100.0));
    assert!(!is_on_target(0.0));
}
