//! Incoming form definitions
//!
//! The JSON document accepted by `POST /api/formapi/create` and by
//! `formctl forms create`. Both go through [`FormSubmission::into_form`], so
//! the two entry points enforce the same rules.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use formctl_core::{Field, Form, OptionSet};

use super::{FieldLabel, FormTitle, ValidationError};

/// `{title, fields: [...]}`. Absent and `null` members both land as `None`
/// so that missing data is reported as a validation error rather than a
/// parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSubmission {
    pub title: Option<String>,
    pub fields: Option<Vec<FieldSubmission>>,
}

/// `{label, options, selectedOption, isRequired}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSubmission {
    pub label: String,
    /// Comma-joined choices, e.g. "US,CA,MX"
    pub options: String,
    pub selected_option: String,
    pub is_required: bool,
}

impl FormSubmission {
    /// Validate and build the in-memory form, stamped with `created_at`.
    ///
    /// `selected_option` is not checked against `options`.
    pub fn into_form(self, created_at: DateTime<Utc>) -> Result<Form, ValidationError> {
        let (Some(title), Some(fields)) = (self.title, self.fields) else {
            return Err(ValidationError::Incomplete);
        };
        if title.trim().is_empty() || fields.is_empty() {
            return Err(ValidationError::Incomplete);
        }

        let title = FormTitle::new(&title)?;
        let mut form = Form::new(title.into_string(), created_at);
        for field in fields {
            form.add_field(field.into_field()?);
        }
        Ok(form)
    }
}

impl FieldSubmission {
    pub fn into_field(self) -> Result<Field, ValidationError> {
        let label = FieldLabel::new(&self.label)?;
        Ok(Field::new(
            label.into_string(),
            OptionSet::parse(&self.options),
            self.selected_option,
            self.is_required,
        ))
    }
}
