use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptionRecord {
    pub id: Uuid,
    pub title: String,
    /// "Unknown" when the posting does not name the company.
    pub company: String,
    pub raw_text: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub role_focus: String,
    pub seniority_level: String,
    pub hidden_signals: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Model verdict on one resume against one job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchAnalysis {
    pub score: f64,
    pub missing_skills: Vec<String>,
    pub strong_matches: Vec<String>,
    pub gap_analysis: String,
    /// "Apply Now" | "Tailor Resume" | "Not a Fit"
    pub recommendation: String,
    pub reasoning: String,
}

/// At most one per (resume_id, job_description_id); the first stored verdict wins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_description_id: Uuid,
    pub score: f64,
    pub analysis: Json<MatchAnalysis>,
    pub created_at: DateTime<Utc>,
}
