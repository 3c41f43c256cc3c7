use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::job::prompts::JD_ANALYSIS_PROMPT;
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::job::JobDescriptionRecord;

pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Structured fields the model extracts from a posting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobAnalysis {
    pub title: String,
    pub company: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub role_focus: String,
    pub seniority_level: String,
    pub hidden_signals: Vec<String>,
}

impl JobAnalysis {
    pub fn into_record(self, raw_text: String) -> JobDescriptionRecord {
        let company = self
            .company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());

        JobDescriptionRecord {
            id: Uuid::new_v4(),
            title: self.title,
            company,
            raw_text,
            required_skills: self.required_skills,
            preferred_skills: self.preferred_skills,
            role_focus: self.role_focus,
            seniority_level: self.seniority_level,
            hidden_signals: self.hidden_signals,
            created_at: Utc::now(),
        }
    }
}

pub async fn analyze_job_description(
    llm: &LlmClient,
    text: &str,
) -> Result<JobAnalysis, AppError> {
    let request = ModelRequest::json(JD_ANALYSIS_PROMPT).with_text(format!("JOB_DESCRIPTION:\n{text}"));
    llm.call_json(&request)
        .await
        .map_err(|e| AppError::Llm(format!("Job description analysis failed: {e}")))
}
