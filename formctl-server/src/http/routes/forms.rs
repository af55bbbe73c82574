//! Form endpoints under `/api/formapi`
//!
//! Handlers validate, delegate to a per-request `UnitOfWork`, and project the
//! stored `Form` onto one of the wire shapes below.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use formctl_core::{Field, Form, FormId};

use crate::db::UnitOfWork;
use crate::http::error::ApiError;
use crate::http::extractors::ValidFormId;
use crate::http::server::AppState;
use crate::models::{FormSubmission, ValidationError};

/// Reply to a successful create
pub const CREATED_MESSAGE: &str = "Form created successfully.";

/// `{id, title}`
#[derive(Debug, Serialize)]
pub struct FormTitleResponse {
    pub id: FormId,
    pub title: String,
}

/// Listing entry: the form row without its fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummaryResponse {
    pub id: FormId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub fields: Vec<FieldResponse>,
}

/// A single form with its fields in display order
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub id: FormId,
    pub title: String,
    pub fields: Vec<FieldResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    pub label: String,
    pub is_required: bool,
    /// Comma-joined choices
    pub options: String,
    pub selected_option: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: &'static str,
    pub form_id: FormId,
}

// Unsaved forms project as id 0; everything served here came from the store.

impl From<Field> for FieldResponse {
    fn from(f: Field) -> Self {
        Self {
            label: f.label,
            is_required: f.is_required,
            options: f.options.to_wire(),
            selected_option: f.selected_option,
        }
    }
}

impl From<Form> for FormTitleResponse {
    fn from(f: Form) -> Self {
        Self {
            id: f.id.unwrap_or_default(),
            title: f.title,
        }
    }
}

impl From<Form> for FormSummaryResponse {
    fn from(f: Form) -> Self {
        Self {
            id: f.id.unwrap_or_default(),
            title: f.title,
            created_at: f.created_at,
            fields: f.fields.into_iter().map(FieldResponse::from).collect(),
        }
    }
}

impl From<Form> for FormResponse {
    fn from(f: Form) -> Self {
        Self {
            id: f.id.unwrap_or_default(),
            title: f.title,
            fields: f.fields.into_iter().map(FieldResponse::from).collect(),
        }
    }
}

/// GET /api/formapi/titles - id and title of every form, newest first
async fn list_titles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FormTitleResponse>>, ApiError> {
    let forms = UnitOfWork::new(state.pool.clone())
        .forms()
        .get_all_forms()
        .await
        .map_err(|e| ApiError::database("loading forms", e))?;

    Ok(Json(forms.into_iter().map(FormTitleResponse::from).collect()))
}

/// GET /api/formapi - every form, newest first, fields not populated
async fn list_forms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FormSummaryResponse>>, ApiError> {
    let forms = UnitOfWork::new(state.pool.clone())
        .forms()
        .get_all_forms()
        .await
        .map_err(|e| ApiError::database("loading forms", e))?;

    Ok(Json(forms.into_iter().map(FormSummaryResponse::from).collect()))
}

/// POST /api/formapi/create - validate and store a form with its fields
async fn create_form(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FormSubmission>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ValidationError::MalformedBody {
        reason: rejection.body_text(),
    })?;
    let form = req.into_form(Utc::now())?;

    let form_id = UnitOfWork::new(state.pool.clone())
        .create_form_atomic(&form)
        .await
        .map_err(|e| ApiError::database("creating the form", e))?;

    Ok(Json(CreatedResponse {
        message: CREATED_MESSAGE,
        form_id,
    }))
}

/// GET /api/formapi/{id} - one form with its fields
async fn get_form(
    State(state): State<Arc<AppState>>,
    ValidFormId(id): ValidFormId,
) -> Result<Json<FormResponse>, ApiError> {
    let form = UnitOfWork::new(state.pool.clone())
        .forms()
        .get_form_by_id(id)
        .await
        .map_err(|e| ApiError::database("loading the form", e))?
        .ok_or_else(|| ApiError::NotFound {
            resource: "form",
            id: id.to_string(),
        })?;

    Ok(Json(FormResponse::from(form)))
}

/// Form routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/formapi", get(list_forms))
        .route("/api/formapi/titles", get(list_titles))
        .route("/api/formapi/create", post(create_form))
        .route("/api/formapi/{id}", get(get_form))
}
