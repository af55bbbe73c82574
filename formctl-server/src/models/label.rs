//! Field label validation

use super::ValidationError;

/// Maximum length for field labels
pub const MAX_LABEL_LEN: usize = 100;

/// Validated field label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabel(String);

impl FieldLabel {
    /// Non-blank, at most 100 characters, stored as given.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "label" });
        }

        if s.chars().count() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field: "label",
                max: MAX_LABEL_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(
            FieldLabel::new("").unwrap_err(),
            ValidationError::Empty { field: "label" }
        );
    }

    #[test]
    fn max_length() {
        assert!(FieldLabel::new(&"l".repeat(100)).is_ok());
        assert_eq!(
            FieldLabel::new(&"l".repeat(101)).unwrap_err(),
            ValidationError::TooLong {
                field: "label",
                max: 100
            }
        );
    }
}
