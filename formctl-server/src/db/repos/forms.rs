//! Form repository
//!
//! Translates `Form`/`Field` records to rows and back:
//! - create: one INSERT for the form (id via RETURNING), one per field
//! - get: form row, then its fields ordered by insertion id
//! - list: form rows newest first, fields not loaded

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use formctl_core::{Field, Form, FormId, OptionSet};

use crate::db::{DbError, DbSession, Params};

const INSERT_FORM: &str = r#"
    INSERT INTO Forms (Title, CreatedAt)
    VALUES (@Title, @CreatedAt)
    RETURNING Id
"#;

const INSERT_FIELD: &str = r#"
    INSERT INTO FormFields (FormId, Label, Options, SelectedOption, IsRequired)
    VALUES (@FormId, @Label, @Options, @SelectedOption, @IsRequired)
"#;

const SELECT_FORM: &str = r#"
    SELECT Id, Title, CreatedAt
    FROM Forms
    WHERE Id = @Id
"#;

const SELECT_FIELDS: &str = r#"
    SELECT Id, FormId, Label, Options, SelectedOption, IsRequired
    FROM FormFields
    WHERE FormId = @FormId
    ORDER BY Id
"#;

// Id breaks ties between forms created within the same clock tick
const SELECT_ALL_FORMS: &str = r#"
    SELECT Id, Title, CreatedAt
    FROM Forms
    ORDER BY CreatedAt DESC, Id DESC
"#;

/// Form repository
pub struct FormRepo<'s> {
    session: &'s mut DbSession,
}

impl<'s> FormRepo<'s> {
    pub fn new(session: &'s mut DbSession) -> Self {
        Self { session }
    }

    /// Insert one form row and return its generated id.
    pub async fn create_form(
        &mut self,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> Result<FormId, DbError> {
        let params = Params::new()
            .bind("Title", title)
            .bind("CreatedAt", created_at);

        let id: FormId = self.session.scalar(INSERT_FORM, &params).await?;
        tracing::debug!(form_id = id, "form row inserted");
        Ok(id)
    }

    /// Insert one field row under `form_id`.
    ///
    /// Does not undo earlier inserts on failure; wrap the whole form in a
    /// `UnitOfWork` transaction for that.
    pub async fn create_field(&mut self, field: &Field, form_id: FormId) -> Result<(), DbError> {
        let params = Params::new()
            .bind("FormId", form_id)
            .bind("Label", field.label.as_str())
            .bind("Options", field.options.to_wire())
            .bind("SelectedOption", field.selected_option.as_str())
            .bind("IsRequired", field.is_required);

        self.session.execute(INSERT_FIELD, &params).await?;
        Ok(())
    }

    /// Insert a form and then each of its fields, in order, one statement at
    /// a time on the session's current connection or transaction.
    pub async fn create_with_fields(&mut self, form: &Form) -> Result<FormId, DbError> {
        let form_id = self.create_form(&form.title, form.created_at).await?;
        for field in &form.fields {
            self.create_field(field, form_id).await?;
        }
        Ok(form_id)
    }

    /// Load a form with its fields, or `None` if no such form exists.
    pub async fn get_form_by_id(&mut self, id: FormId) -> Result<Option<Form>, DbError> {
        let rows = self
            .session
            .query(SELECT_FORM, &Params::new().bind("Id", id))
            .await?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let mut form = form_from_row(row)?;

        let field_rows = self
            .session
            .query(SELECT_FIELDS, &Params::new().bind("FormId", id))
            .await?;
        for row in &field_rows {
            form.add_field(field_from_row(row)?);
        }

        Ok(Some(form))
    }

    /// All forms, most recent first. Fields are left empty.
    pub async fn get_all_forms(&mut self) -> Result<Vec<Form>, DbError> {
        let rows = self.session.query(SELECT_ALL_FORMS, &Params::new()).await?;
        rows.iter().map(form_from_row).collect()
    }
}

fn form_from_row(row: &SqliteRow) -> Result<Form, DbError> {
    Ok(Form::with_id(
        row.try_get("Id")?,
        row.try_get::<String, _>("Title")?,
        row.try_get("CreatedAt")?,
    ))
}

fn field_from_row(row: &SqliteRow) -> Result<Field, DbError> {
    let options: String = row.try_get("Options")?;
    Ok(Field {
        id: Some(row.try_get("Id")?),
        form_id: Some(row.try_get("FormId")?),
        label: row.try_get("Label")?,
        options: OptionSet::parse(&options),
        selected_option: row.try_get("SelectedOption")?,
        is_required: row.try_get("IsRequired")?,
    })
}
