//! Form title validation

use super::ValidationError;

/// Maximum length for form titles
pub const MAX_TITLE_LEN: usize = 255;

/// Validated form title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTitle(String);

impl FormTitle {
    /// Create a new form title.
    ///
    /// # Rules
    /// - Not blank (whitespace-only counts as blank)
    /// - Max 255 characters
    /// - Kept exactly as given, surrounding whitespace included
    ///
    /// # Example
    /// ```
    /// use formctl_server::models::FormTitle;
    ///
    /// assert!(FormTitle::new("Survey").is_ok());
    /// assert!(FormTitle::new("").is_err());
    /// assert!(FormTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if s.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for FormTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
