use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::prompts::{NEXT_QUESTION_PROMPT, OPENING_HISTORY};
use crate::llm_client::prompts::{fill_template, to_prompt_json};
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::interview::{Difficulty, Exchange};
use crate::models::job::JobDescriptionRecord;
use crate::models::resume::{ProjectEntry, ResumeRecord, WorkExperienceEntry};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub hints: String,
    pub is_deep_dive: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateContext<'a> {
    pub skills: &'a [String],
    pub projects: &'a [ProjectEntry],
    pub work_experience: &'a [WorkExperienceEntry],
    pub impact_metrics: &'a [String],
}

impl<'a> CandidateContext<'a> {
    pub fn from_resume(resume: &'a ResumeRecord) -> Self {
        Self {
            skills: &resume.tech_skills,
            projects: &resume.projects.0,
            work_experience: &resume.work_experience.0,
            impact_metrics: &resume.impact_metrics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleContext<'a> {
    pub role: &'a str,
    pub focus: &'a str,
    pub level: &'a str,
    pub required: &'a [String],
}

impl<'a> RoleContext<'a> {
    pub fn from_job(jd: &'a JobDescriptionRecord) -> Self {
        Self {
            role: &jd.title,
            focus: &jd.role_focus,
            level: &jd.seniority_level,
            required: &jd.required_skills,
        }
    }
}

pub struct QuestionRequest<'a> {
    pub history: &'a [Exchange],
    pub candidate: CandidateContext<'a>,
    pub role: RoleContext<'a>,
    /// Session interview type, e.g. SCREENING.
    pub focus: &'a str,
    pub difficulty: Difficulty,
}

fn build_prompt(req: &QuestionRequest<'_>) -> String {
    let history = if req.history.is_empty() {
        OPENING_HISTORY.to_string()
    } else {
        format!("History: {}", to_prompt_json(&req.history))
    };
    fill_template(
        NEXT_QUESTION_PROMPT,
        &[
            ("{history}", history.as_str()),
            ("{focus}", req.focus),
            ("{difficulty}", req.difficulty.as_str()),
            ("{resume}", to_prompt_json(&req.candidate).as_str()),
            ("{job}", to_prompt_json(&req.role).as_str()),
        ],
    )
}

pub async fn generate_question(
    llm: &LlmClient,
    req: &QuestionRequest<'_>,
) -> Result<GeneratedQuestion, AppError> {
    llm.call_json(&ModelRequest::json(build_prompt(req)))
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_exchange, sample_job, sample_resume};

    #[test]
    fn test_opening_prompt_has_no_history() {
        let resume = sample_resume();
        let jd = sample_job();
        let prompt = build_prompt(&QuestionRequest {
            history: &[],
            candidate: CandidateContext::from_resume(&resume),
            role: RoleContext::from_job(&jd),
            focus: "SCREENING",
            difficulty: Difficulty::Medium,
        });
        assert!(prompt.contains(OPENING_HISTORY));
        assert!(prompt.contains("Suggested Difficulty: MEDIUM"));
        assert!(prompt.contains("Current Focus: SCREENING"));
        assert!(prompt.contains(&format!(r#""role":"{}""#, jd.title)));
    }

    #[test]
    fn test_history_is_embedded_as_json() {
        let resume = sample_resume();
        let jd = sample_job();
        let history = vec![sample_exchange("Technical", 90.0)];
        let prompt = build_prompt(&QuestionRequest {
            history: &history,
            candidate: CandidateContext::from_resume(&resume),
            role: RoleContext::from_job(&jd),
            focus: "SCREENING",
            difficulty: Difficulty::Hard,
        });
        assert!(!prompt.contains(OPENING_HISTORY));
        assert!(prompt.contains("History: [{"));
        assert!(prompt.contains(r#""score":90.0"#));
    }

    #[test]
    fn test_history_answer_with_placeholder_is_not_expanded() {
        let resume = sample_resume();
        let jd = sample_job();
        let mut exchange = sample_exchange("Technical", 70.0);
        exchange.answer = "I templated {resume} and {job} into emails".into();
        let history = vec![exchange];
        let prompt = build_prompt(&QuestionRequest {
            history: &history,
            candidate: CandidateContext::from_resume(&resume),
            role: RoleContext::from_job(&jd),
            focus: "SCREENING",
            difficulty: Difficulty::Medium,
        });
        assert!(prompt.contains("I templated {resume} and {job} into emails"));
        assert_eq!(prompt.matches(r#""required":["#).count(), 1);
    }

    #[test]
    fn test_question_parses_with_defaults() {
        let q: GeneratedQuestion =
            serde_json::from_str(r#"{"question":"Why Rust?","type":"Technical"}"#).unwrap();
        assert_eq!(q.question_type, "Technical");
        assert!(!q.is_deep_dive);
    }
}
