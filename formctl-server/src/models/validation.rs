//! Validation error types

use std::fmt;

/// Validation error for incoming form definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title blank or no fields at all
    Incomplete,

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be read as a form definition
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => {
                write!(f, "Form title and at least one field are required.")
            }
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::MalformedBody { reason } => write!(f, "Invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 255 characters"
        );
    }

    #[test]
    fn malformed_body_carries_reason() {
        let err = ValidationError::MalformedBody {
            reason: "EOF while parsing".into(),
        };
        assert_eq!(err.to_string(), "Invalid request body: EOF while parsing");
    }

    #[test]
    fn incomplete_message_is_stable() {
        assert_eq!(
            ValidationError::Incomplete.to_string(),
            "Form title and at least one field are required."
        );
    }
}
