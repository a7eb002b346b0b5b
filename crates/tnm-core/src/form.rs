use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How a control stores and reports its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Select,
    Radio,
    /// Single boolean checkbox. Its logical value is `"true"` or `"false"`.
    Checkbox,
    /// Multi-choice checkbox group sharing one name.
    CheckboxGroup,
    Text,
    Number,
}

impl FieldKind {
    pub fn is_checkable(self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::CheckboxGroup)
    }
}

/// One input control. Radio and checkbox groups are several controls with
/// the same `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Control {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

impl Control {
    fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked,
        }
    }

    pub fn select(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Select, value, false)
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text, value, false)
    }

    pub fn number(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number, value, false)
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::Radio, value, checked)
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::Checkbox, "true", checked)
    }

    pub fn checkbox_member(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::CheckboxGroup, value, checked)
    }
}

/// The live form snapshot the engine reads from and writes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormState {
    controls: Vec<Control>,
}

impl FormState {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn push(&mut self, control: Control) {
        self.controls.push(control);
    }

    pub fn controls_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Control> + 'a {
        self.controls.iter().filter(move |c| c.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.controls.iter().any(|c| c.name == name)
    }

    /// Distinct field names in first-appearance order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for control in &self.controls {
            if !names.contains(&control.name.as_str()) {
                names.push(&control.name);
            }
        }
        names
    }

    /// Assign a logical value to every control named `name`.
    ///
    /// Radio and checkbox-group members are checked iff their value matches.
    /// A boolean checkbox is checked iff `value` is truthy. Returns `false`
    /// when no control has that name.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let mut found = false;
        for control in self.controls.iter_mut().filter(|c| c.name == name) {
            found = true;
            match control.kind {
                FieldKind::Radio | FieldKind::CheckboxGroup => {
                    control.checked = !value.is_empty() && control.value == value;
                }
                FieldKind::Checkbox => control.checked = to_bool(value),
                FieldKind::Select | FieldKind::Text | FieldKind::Number => {
                    control.value = value.to_string();
                }
            }
        }
        found
    }
}

/// Lenient boolean reading used for checkbox values.
pub fn to_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}
