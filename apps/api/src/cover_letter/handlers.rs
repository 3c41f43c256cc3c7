use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::generator::{generate_cover_letter, CoverLetter};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub resume_id: Option<Uuid>,
    pub job_description_id: Option<Uuid>,
}

/// POST /api/cover-letter/generate
///
/// An unknown `jobDescriptionId` falls back to a generic target. Nothing is stored.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetter>, AppError> {
    let resume_id = req
        .resume_id
        .ok_or_else(|| AppError::Validation("resumeId is required".to_string()))?;
    let resume = state
        .store
        .get_resume(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let jd = match req.job_description_id {
        Some(id) => state.store.get_job_description(id).await?,
        None => None,
    };

    let letter = generate_cover_letter(&state.llm, &resume, jd.as_ref()).await?;
    info!(
        "Generated cover letter for resume {resume_id} ({} chars)",
        letter.cover_letter.len()
    );
    Ok(Json(letter))
}
