//! Resume ↔ job scoring. One stored verdict per pair; later calls return it
//! without asking the model again.

use chrono::Utc;
use serde::Serialize;
use sqlx::types::Json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::job::prompts::MATCH_PROMPT;
use crate::llm_client::prompts::{
    fill_template, to_prompt_json, truncate_chars, JD_MATCH_TEXT_BUDGET,
};
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::job::{JobDescriptionRecord, MatchAnalysis, MatchRecord};
use crate::models::resume::{ProjectEntry, ResumeRecord};
use crate::store::SessionStore;

#[derive(Debug, Serialize)]
struct ResumeContext<'a> {
    skills: Vec<String>,
    projects: &'a [ProjectEntry],
    experience: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JobContext<'a> {
    title: &'a str,
    required: &'a [String],
    role_focus: &'a str,
    signals: &'a [String],
    text: &'a str,
}

async fn score_match(
    llm: &LlmClient,
    resume: &ResumeRecord,
    jd: &JobDescriptionRecord,
) -> Result<MatchAnalysis, AppError> {
    let resume_ctx = ResumeContext {
        skills: resume.all_skills(),
        projects: &resume.projects.0,
        experience: &resume.bullet_points,
    };
    let jd_ctx = JobContext {
        title: &jd.title,
        required: &jd.required_skills,
        role_focus: &jd.role_focus,
        signals: &jd.hidden_signals,
        text: truncate_chars(&jd.raw_text, JD_MATCH_TEXT_BUDGET),
    };
    let prompt = fill_template(
        MATCH_PROMPT,
        &[
            ("{resume}", to_prompt_json(&resume_ctx).as_str()),
            ("{jd}", to_prompt_json(&jd_ctx).as_str()),
        ],
    );

    llm.call_json(&ModelRequest::json(prompt))
        .await
        .map_err(|e| AppError::Llm(format!("Match analysis failed: {e}")))
}

pub async fn match_resume_to_job(
    store: &dyn SessionStore,
    llm: &LlmClient,
    resume_id: Uuid,
    job_description_id: Uuid,
) -> Result<MatchRecord, AppError> {
    if let Some(existing) = store.find_match(resume_id, job_description_id).await? {
        debug!("Returning stored match {} for resume {resume_id}", existing.id);
        return Ok(existing);
    }

    let resume = store.get_resume(resume_id).await?;
    let jd = store.get_job_description(job_description_id).await?;
    let (resume, jd) = match (resume, jd) {
        (Some(r), Some(j)) => (r, j),
        _ => {
            return Err(AppError::NotFound(
                "Resume or Job Description not found".to_string(),
            ))
        }
    };

    let mut analysis = score_match(llm, &resume, &jd).await?;
    analysis.score = analysis.score.clamp(0.0, 100.0);

    let record = MatchRecord {
        id: Uuid::new_v4(),
        resume_id,
        job_description_id,
        score: analysis.score,
        analysis: Json(analysis),
        created_at: Utc::now(),
    };
    let stored = store.insert_match(&record).await?;
    info!(
        "Match {} stored for resume {resume_id} / job {job_description_id}: score {}",
        stored.id, stored.score
    );
    Ok(stored)
}
