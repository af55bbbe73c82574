//! Form and field records
//!
//! Plain data. Validation belongs to whichever entry point accepts user
//! input; these types only hold what was accepted or read back from storage.

use chrono::{DateTime, Utc};

use crate::options::OptionSet;

/// Store-assigned form identifier
pub type FormId = i64;

/// Store-assigned field identifier, unique within its form
pub type FieldId = i64;

/// A user-defined form: a title plus fields in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    /// `None` until the form has been persisted
    pub id: Option<FormId>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Insertion order is display order
    pub fields: Vec<Field>,
}

impl Form {
    /// New, unsaved form with no fields.
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            created_at,
            fields: Vec::new(),
        }
    }

    /// Form as read back from storage.
    pub fn with_id(id: FormId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, created_at)
        }
    }

    /// Append a field after the existing ones.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// One option-set element of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: Option<FieldId>,
    /// Back-reference to the owning form, set once persisted
    pub form_id: Option<FormId>,
    pub label: String,
    pub options: OptionSet,
    pub selected_option: String,
    pub is_required: bool,
}

impl Field {
    pub fn new(
        label: impl Into<String>,
        options: OptionSet,
        selected_option: impl Into<String>,
        is_required: bool,
    ) -> Self {
        Self {
            id: None,
            form_id: None,
            label: label.into(),
            options,
            selected_option: selected_option.into(),
            is_required,
        }
    }

    /// Whether `selected_option` is one of `options`.
    ///
    /// Informational only; nothing rejects a field on this basis.
    pub fn has_valid_selection(&self) -> bool {
        self.options.contains(&self.selected_option)
    }
}
