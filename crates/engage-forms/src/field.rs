//! Form field model.

/// Input type of a field; selects which format rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Url,
    TextArea,
    Select,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Current value. For checkboxes, `"on"` when checked and empty otherwise.
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            value: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Whether the field is included in a submission. Unchecked boxes are not.
    pub fn is_submitted(&self) -> bool {
        self.kind != FieldKind::Checkbox || !self.value.is_empty()
    }
}
