//! Validation error types

/// A single field that failed validation, either client-side before a
/// submit or as reported by a Frappe `ValidationError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
