use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

use crate::error::ReportError;
use crate::staging::{
    describe, stage_group, DIFFERENTIATION_GRADES, HISTOLOGICAL_TYPES, LYMPHATIC_INVASION,
    M_STAGES, MARGIN_STATUS, N_STAGES, T_STAGES, VENOUS_INVASION,
};

pub const PARAGRAPH_TEMPLATE_NAME: &str = "diagnostic_paragraph.txt";

/// Default report layout. Each `{% if %}` block emits its section followed
/// by one blank line.
pub const DEFAULT_TEMPLATE: &str = "\
【病理診断報告書 / Pathological Diagnosis Report】

■ 組織型 / Histological Type:
  {{ hist_desc }}
  分化度 / Differentiation: {{ diff_desc }}
{% if histologic_summary %}  組織構成 / Composition: {{ histologic_summary }}
{% endif %}
{% if location %}■ 占拠部位 / Location: {{ location }}

{% endif %}{% if tumor_size %}■ 腫瘍最大径 / Tumor Size: {{ tumor_size }}

{% endif %}■ 進行度 / TNM Classification:
  T: {{ t_stage }} - {{ t_desc }}
  N: {{ n_stage }} - {{ n_desc }}
  M: {{ m_stage }} - {{ m_desc }}
  pStage: {{ pstage }}
{% if nodal_summary %}  リンパ節 / Lymph nodes: {{ nodal_summary }}
{% endif %}
■ 脈管侵襲 / Vascular Invasion:
  リンパ管侵襲 / Lymphatic invasion: {{ lymphatic_invasion }} - {{ ly_desc }}
  静脈侵襲 / Venous invasion: {{ venous_invasion }} - {{ v_desc }}

■ 切除断端 / Resection Margin:
  {{ margin_status }} - {{ margin_desc }}

{% if additional_findings %}■ その他の所見 / Additional Findings:
  {{ additional_findings }}

{% endif %}---
本報告書は癌取扱い規約に準拠して作成されています。
This report follows the Japanese General Rules for Clinical and Pathological Study of Cancer.";

/// Submitted values feeding the diagnostic paragraph. Missing keys take
/// the "cannot be assessed" codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticInput {
    pub t_stage: String,
    pub n_stage: String,
    pub m_stage: String,
    pub histological_type: String,
    pub differentiation: String,
    pub lymphatic_invasion: String,
    pub venous_invasion: String,
    pub margin_status: String,
    pub tumor_size: String,
    pub location: String,
    pub additional_findings: String,
    /// Output of the mixture summary, if the form has one.
    pub histologic_summary: String,
    pub nodal_summary: String,
    /// Stage from an organ stage table; overrides the simplified grouping.
    pub stage: Option<String>,
}

impl Default for DiagnosticInput {
    fn default() -> Self {
        Self {
            t_stage: "TX".to_string(),
            n_stage: "NX".to_string(),
            m_stage: "MX".to_string(),
            histological_type: "other".to_string(),
            differentiation: "GX".to_string(),
            lymphatic_invasion: "lyX".to_string(),
            venous_invasion: "vX".to_string(),
            margin_status: "RX".to_string(),
            tumor_size: String::new(),
            location: String::new(),
            additional_findings: String::new(),
            histologic_summary: String::new(),
            nodal_summary: String::new(),
            stage: None,
        }
    }
}

impl DiagnosticInput {
    /// Build from submitted name/value pairs. The first value of a repeated
    /// name wins; unknown names are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = serde_json::Map::new();
        for (name, value) in pairs {
            map.entry(name.to_string())
                .or_insert_with(|| serde_json::Value::String(value.to_string()));
        }
        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }
}

#[derive(Serialize)]
struct ParagraphContext<'a> {
    #[serde(flatten)]
    input: &'a DiagnosticInput,
    t_desc: &'static str,
    n_desc: &'static str,
    m_desc: &'static str,
    hist_desc: &'static str,
    diff_desc: &'static str,
    ly_desc: &'static str,
    v_desc: &'static str,
    margin_desc: &'static str,
    pstage: String,
}

impl<'a> ParagraphContext<'a> {
    fn new(input: &'a DiagnosticInput) -> Self {
        let pstage = input
            .stage
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| stage_group(&input.t_stage, &input.n_stage, &input.m_stage).to_string());

        Self {
            input,
            t_desc: describe(T_STAGES, &input.t_stage).unwrap_or("Primary tumor status unknown"),
            n_desc: describe(N_STAGES, &input.n_stage).unwrap_or("Regional lymph node status unknown"),
            m_desc: describe(M_STAGES, &input.m_stage).unwrap_or("Distant metastasis status unknown"),
            hist_desc: describe(HISTOLOGICAL_TYPES, &input.histological_type)
                .unwrap_or("Histological type unspecified"),
            diff_desc: describe(DIFFERENTIATION_GRADES, &input.differentiation)
                .unwrap_or("Grade unspecified"),
            ly_desc: describe(LYMPHATIC_INVASION, &input.lymphatic_invasion)
                .unwrap_or("Lymphatic invasion status unknown"),
            v_desc: describe(VENOUS_INVASION, &input.venous_invasion)
                .unwrap_or("Venous invasion status unknown"),
            margin_desc: describe(MARGIN_STATUS, &input.margin_status).unwrap_or("Margin status unknown"),
            pstage,
        }
    }
}

/// Render the diagnostic paragraph with the default layout.
pub fn generate_diagnostic_paragraph(input: &DiagnosticInput) -> Result<String, ReportError> {
    render_paragraph(PARAGRAPH_TEMPLATE_NAME, DEFAULT_TEMPLATE, input)
}

/// Render the diagnostic paragraph with a caller-supplied Tera template.
///
/// The context holds every [`DiagnosticInput`] field plus the `*_desc`
/// descriptions and the resolved `pstage`.
pub fn render_paragraph(
    template_name: &str,
    template_content: &str,
    input: &DiagnosticInput,
) -> Result<String, ReportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ReportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(ParagraphContext::new(input))?;
    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}
