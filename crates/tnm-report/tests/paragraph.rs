use tnm_report::paragraph::{generate_diagnostic_paragraph, render_paragraph, DiagnosticInput};

#[test]
fn defaults_render_unassessable_report() {
    let text = generate_diagnostic_paragraph(&DiagnosticInput::default()).unwrap();

    assert!(text.starts_with("【病理診断報告書 / Pathological Diagnosis Report】\n\n"));
    assert!(text.contains("  Other histological type\n"));
    assert!(text.contains("  T: TX - Primary tumor cannot be assessed\n"));
    assert!(text.contains("  pStage: Stage cannot be determined\n"));
    assert!(text.contains("  RX - Presence of residual tumor cannot be assessed\n\n---\n"));
    assert!(!text.contains("Location"));
    assert!(!text.contains("Tumor Size"));
    assert!(!text.contains("Additional Findings"));
    assert!(text.ends_with("Japanese General Rules for Clinical and Pathological Study of Cancer."));
}

#[test]
fn sections_are_separated_by_single_blank_lines() {
    let text = generate_diagnostic_paragraph(&DiagnosticInput::default()).unwrap();
    assert!(text.contains("Differentiation: Grade cannot be assessed\n\n■ 進行度"));
    assert!(text.contains("pStage: Stage cannot be determined\n\n■ 脈管侵襲"));
    assert!(!text.contains("\n\n\n"));
}

#[test]
fn optional_sections_appear_when_filled() {
    let input = DiagnosticInput {
        t_stage: "T2".to_string(),
        n_stage: "N0".to_string(),
        m_stage: "M0".to_string(),
        histological_type: "adenocarcinoma".to_string(),
        differentiation: "G2".to_string(),
        lymphatic_invasion: "ly1".to_string(),
        venous_invasion: "v0".to_string(),
        margin_status: "R0".to_string(),
        tumor_size: "32 mm".to_string(),
        location: "right upper lobe".to_string(),
        additional_findings: "STAS present & focal".to_string(),
        histologic_summary: "Adenocarcinoma, papillary (主 70%), mucinous 30%".to_string(),
        nodal_summary: "#7 (1/3)".to_string(),
        stage: None,
    };
    let text = generate_diagnostic_paragraph(&input).unwrap();

    assert!(text.contains("  Adenocarcinoma\n  分化度 / Differentiation: Moderately differentiated\n"));
    assert!(text.contains("  組織構成 / Composition: Adenocarcinoma, papillary (主 70%), mucinous 30%\n\n"));
    assert!(text.contains("■ 占拠部位 / Location: right upper lobe\n\n■ 腫瘍最大径 / Tumor Size: 32 mm\n\n"));
    assert!(text.contains("  pStage: Stage IIA\n  リンパ節 / Lymph nodes: #7 (1/3)\n\n"));
    assert!(text.contains("  リンパ管侵襲 / Lymphatic invasion: ly1 - Lymphatic invasion present\n"));
    // plain text output, nothing escaped
    assert!(text.contains("  STAS present & focal\n\n---\n"));
    assert!(!text.contains("\n\n\n"));
}

#[test]
fn stage_table_result_overrides_grouping() {
    let input = DiagnosticInput {
        t_stage: "T1a".to_string(),
        n_stage: "N0".to_string(),
        m_stage: "M0".to_string(),
        stage: Some("IA1".to_string()),
        ..DiagnosticInput::default()
    };
    let text = generate_diagnostic_paragraph(&input).unwrap();
    assert!(text.contains("  pStage: IA1\n"));
}

#[test]
fn unknown_codes_fall_back_to_unknown_descriptions() {
    let input = DiagnosticInput {
        t_stage: "T9".to_string(),
        margin_status: "R5".to_string(),
        ..DiagnosticInput::default()
    };
    let text = generate_diagnostic_paragraph(&input).unwrap();
    assert!(text.contains("  T: T9 - Primary tumor status unknown\n"));
    assert!(text.contains("  R5 - Margin status unknown\n"));
}

#[test]
fn input_from_submitted_pairs() {
    let pairs = [
        ("t_stage", "T3"),
        ("n_stage", "N1"),
        ("n_stage", "N2"),
        ("location", "sigmoid colon"),
        ("unrelated", "ignored"),
    ];
    let input = DiagnosticInput::from_pairs(pairs).unwrap();
    assert_eq!(input.t_stage, "T3");
    assert_eq!(input.n_stage, "N1");
    assert_eq!(input.m_stage, "MX");
    assert_eq!(input.location, "sigmoid colon");

    let text = generate_diagnostic_paragraph(&input).unwrap();
    assert!(text.contains("  pStage: Stage III\n"));
}

#[test]
fn custom_template_sees_descriptions() {
    let input = DiagnosticInput {
        margin_status: "R1".to_string(),
        ..DiagnosticInput::default()
    };
    let text = render_paragraph("margin.txt", "{{ margin_status }}: {{ margin_desc }}", &input).unwrap();
    assert_eq!(text, "R1: Microscopic residual tumor");
}

#[test]
fn broken_template_is_a_parse_error() {
    let result = render_paragraph("broken.txt", "{% if %}", &DiagnosticInput::default());
    assert!(matches!(result, Err(tnm_report::error::ReportError::TemplateParse(_))));
}
