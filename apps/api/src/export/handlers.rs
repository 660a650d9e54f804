//! Axum route handler for PDF export.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Response,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::export::export_pdf;
use crate::export::pdf::{PDF_FILENAME, PDF_MIME};
use crate::export::preview::build_preview;
use crate::latex::handlers::{download, record_from, TemplateQuery};
use crate::latex::templates::TemplateId;
use crate::models::ResumeRecord;
use crate::state::AppState;
use crate::validation::validate_record;

/// POST /api/v1/resumes/pdf?template=<id>
///
/// Renders the preview for the chosen template and returns it as `resume.pdf`
/// with clickable links. Exports are serialized through `AppState::export_lock`.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    payload: Result<Json<ResumeRecord>, JsonRejection>,
) -> Result<Response, AppError> {
    let record = record_from(payload)?;
    validate_record(&record)?;
    let id: TemplateId = query
        .template
        .parse()
        .map_err(|_| AppError::TemplateNotFound(query.template.clone()))?;

    let preview = build_preview(&record, id);
    let bytes = {
        let _exclusive = state.export_lock.lock().await;
        export_pdf(state.surface.as_ref(), &preview, &state.export_options()).await?
    };

    info!(template = %id, bytes = bytes.len(), "PDF export served");
    Ok(download(PDF_MIME, PDF_FILENAME, bytes))
}
