//! Axum route handlers for template listing and LaTeX download.

use axum::{
    extract::{rejection::JsonRejection, Query},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::latex::generator::{generate_by_id, LATEX_FILENAME, LATEX_MIME, TEMPLATE_NOT_FOUND};
use crate::latex::templates::{templates, TemplateId};
use crate::models::ResumeRecord;
use crate::validation::validate_record;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    TemplateId::Classic.as_str().to_string()
}

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub label: &'static str,
}

/// Unwraps the JSON body, turning malformed payloads into a validation error.
pub fn record_from(payload: Result<Json<ResumeRecord>, JsonRejection>) -> Result<ResumeRecord, AppError> {
    payload
        .map(|Json(record)| record)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// `Content-Type` plus an attachment `Content-Disposition` for `filename`.
pub fn download(mime: &'static str, filename: &str, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
///
/// Registered templates in display order.
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        templates()
            .iter()
            .map(|t| TemplateSummary {
                id: t.id.as_str(),
                label: t.label,
            })
            .collect(),
    )
}

/// POST /api/v1/resumes/latex?template=<id>
///
/// Validates the record and returns the filled template as `resume.tex`.
pub async fn handle_generate_latex(
    Query(query): Query<TemplateQuery>,
    payload: Result<Json<ResumeRecord>, JsonRejection>,
) -> Result<Response, AppError> {
    let record = record_from(payload)?;
    validate_record(&record)?;

    let latex = generate_by_id(&record, &query.template);
    if latex == TEMPLATE_NOT_FOUND {
        return Err(AppError::TemplateNotFound(query.template));
    }

    info!(template = %query.template, bytes = latex.len(), "LaTeX generated");
    Ok(download(LATEX_MIME, LATEX_FILENAME, latex))
}
