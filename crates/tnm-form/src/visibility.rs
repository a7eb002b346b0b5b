//! Conditional region visibility.

use std::collections::HashMap;

use tracing::{debug, warn};

use tnm_core::conditional::{ConditionalDecl, ConditionalField};
use tnm_core::form::{FieldKind, FormState};

use crate::error::FormError;
use crate::view::{RegionDisplay, RegionView, ViewState};

/// Read the logical value of field `name`.
///
/// The first control with that name decides how it is read. Missing fields
/// read as `""`; a boolean checkbox reads as `"true"` or `"false"`.
pub fn get_field_value(state: &FormState, name: &str) -> String {
    let Some(first) = state.controls_named(name).next() else {
        return String::new();
    };

    match first.kind {
        FieldKind::Radio | FieldKind::CheckboxGroup => state
            .controls_named(name)
            .find(|c| c.checked)
            .map(|c| c.value.clone())
            .unwrap_or_default(),
        FieldKind::Checkbox => {
            if state.controls_named(name).any(|c| c.checked) {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        FieldKind::Select | FieldKind::Text | FieldKind::Number => first.value.clone(),
    }
}

pub struct VisibilityController {
    fields: Vec<ConditionalField>,
    /// Trigger field name → indices into `fields`.
    by_trigger: HashMap<String, Vec<usize>>,
}

impl VisibilityController {
    pub fn new(decls: &[ConditionalDecl]) -> Result<Self, FormError> {
        let mut fields: Vec<ConditionalField> = Vec::with_capacity(decls.len());
        for decl in decls {
            let field = ConditionalField::parse(decl);
            if fields.iter().any(|f| f.region_id == field.region_id) {
                return Err(FormError::DuplicateRegion(field.region_id));
            }
            if field.trigger_field_name.is_empty() {
                // Nothing can match, so the region stays collapsed.
                warn!(region = %field.region_id, "conditional region has no trigger field");
            }
            fields.push(field);
        }

        let mut by_trigger: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, field) in fields.iter().enumerate() {
            if field.trigger_field_name.is_empty() {
                continue;
            }
            by_trigger
                .entry(field.trigger_field_name.clone())
                .or_default()
                .push(index);
        }

        Ok(Self { fields, by_trigger })
    }

    pub fn fields(&self) -> &[ConditionalField] {
        &self.fields
    }

    pub fn is_trigger(&self, name: &str) -> bool {
        self.by_trigger.contains_key(name)
    }

    /// Recompute every region. Values of hidden fields are left as they are,
    /// so they come back if the region is shown again.
    pub fn recompute(&self, state: &FormState, view: &mut ViewState) {
        for field in &self.fields {
            let view_for = if field.trigger_field_name.is_empty() {
                RegionView {
                    display: RegionDisplay::Collapsed,
                }
            } else {
                evaluate(field, &get_field_value(state, &field.trigger_field_name))
            };
            view.regions.insert(field.region_id.clone(), view_for);
        }
    }

    /// Recompute only the regions gated by `trigger`.
    pub fn recompute_for(&self, trigger: &str, state: &FormState, view: &mut ViewState) {
        let Some(indices) = self.by_trigger.get(trigger) else {
            return;
        };
        let value = get_field_value(state, trigger);
        for &index in indices {
            let field = &self.fields[index];
            view.regions
                .insert(field.region_id.clone(), evaluate(field, &value));
        }
        debug!(trigger, value = %value, regions = indices.len(), "recomputed conditional regions");
    }
}

fn evaluate(field: &ConditionalField, value: &str) -> RegionView {
    let display = if field.allows(value) {
        RegionDisplay::from(field.display_mode)
    } else {
        RegionDisplay::Collapsed
    };
    RegionView { display }
}
