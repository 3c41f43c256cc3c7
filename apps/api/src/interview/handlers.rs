use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::orchestrator::{
    finish_interview, init_session, next_question, submit_answer, AnswerSubmission, NewSession,
    NextStep, SubmitOutcome,
};
use crate::models::interview::{Difficulty, InterviewReport, InterviewSession};
use crate::state::AppState;

fn require_session_id(id: Option<Uuid>) -> Result<Uuid, AppError> {
    id.ok_or_else(|| AppError::Validation("sessionId is required".to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitRequest {
    pub resume_id: Option<Uuid>,
    pub job_description_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub interview_type: Option<String>,
    pub difficulty: Option<String>,
}

/// POST /api/interview/init
pub async fn handle_init(
    State(state): State<AppState>,
    Json(req): Json<InitRequest>,
) -> Result<Json<InterviewSession>, AppError> {
    let (Some(resume_id), Some(job_description_id)) = (req.resume_id, req.job_description_id)
    else {
        return Err(AppError::Validation(
            "resumeId and jobDescriptionId are required".to_string(),
        ));
    };

    let difficulty = req
        .difficulty
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::parse::<Difficulty>)
        .transpose()
        .map_err(AppError::Validation)?;

    let session = init_session(
        state.store.as_ref(),
        NewSession {
            resume_id,
            job_description_id,
            interview_type: req.interview_type,
            difficulty,
        },
    )
    .await?;
    Ok(Json(session))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: Option<Uuid>,
}

/// POST /api/interview/next
pub async fn handle_next(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<NextStep>, AppError> {
    let session_id = require_session_id(req.session_id)?;
    let step = next_question(state.store.as_ref(), &state.llm, session_id).await?;
    Ok(Json(step))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
}

/// POST /api/interview/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitOutcome>, AppError> {
    let session_id = require_session_id(req.session_id)?;
    let outcome = submit_answer(
        state.store.as_ref(),
        &state.llm,
        session_id,
        AnswerSubmission {
            question: req.question,
            answer: req.answer,
            question_type: req.question_type,
        },
    )
    .await?;
    Ok(Json(outcome))
}

/// POST /api/interview/results
pub async fn handle_results(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<InterviewReport>, AppError> {
    let session_id = require_session_id(req.session_id)?;
    let report = finish_interview(state.store.as_ref(), &state.llm, session_id).await?;
    Ok(Json(report))
}
