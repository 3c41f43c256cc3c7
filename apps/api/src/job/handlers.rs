use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::job::analysis::analyze_job_description;
use crate::job::intel::{job_intel, JobIntel};
use crate::job::matching::match_resume_to_job;
use crate::models::job::{JobDescriptionRecord, MatchRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /api/job/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeJobRequest>,
) -> Result<Json<JobDescriptionRecord>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description text is required".to_string(),
        ));
    }

    let analysis = analyze_job_description(&state.llm, &req.text).await?;
    let record = analysis.into_record(req.text);
    state.store.insert_job_description(&record).await?;
    info!("Stored job description {} ({} @ {})", record.id, record.title, record.company);

    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub resume_id: Option<Uuid>,
    pub job_description_id: Option<Uuid>,
}

/// POST /api/job/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchRecord>, AppError> {
    let (Some(resume_id), Some(job_description_id)) = (req.resume_id, req.job_description_id)
    else {
        return Err(AppError::Validation(
            "resumeId and jobDescriptionId are required".to_string(),
        ));
    };

    let record =
        match_resume_to_job(state.store.as_ref(), &state.llm, resume_id, job_description_id)
            .await?;
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIntelRequest {
    pub job_description: Option<String>,
    pub resume_text: Option<String>,
}

/// POST /api/job-intel
pub async fn handle_job_intel(
    State(state): State<AppState>,
    Json(req): Json<JobIntelRequest>,
) -> Result<Json<JobIntel>, AppError> {
    let job_description = req
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;
    let resume_text = req
        .resume_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let intel = job_intel(&state.llm, job_description, resume_text).await?;
    Ok(Json(intel))
}
