use serde::{Deserialize, Serialize};

use crate::cover_letter::prompts::COVER_LETTER_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::{
    fill_template, to_prompt_json, truncate_chars, JD_TEXT_BUDGET,
};
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::job::JobDescriptionRecord;
use crate::models::resume::ResumeRecord;

/// Bullet points from the resume quoted as experience.
const EXPERIENCE_BULLETS: usize = 5;

const DEFAULT_TITLE: &str = "Software Engineer";
const DEFAULT_COMPANY: &str = "Hiring Team";

#[derive(Debug, Serialize)]
struct CandidateContext<'a> {
    /// The filename stands in for the candidate's name.
    name: &'a str,
    skills: Vec<String>,
    highlights: &'a [String],
    experience: &'a [String],
}

impl<'a> CandidateContext<'a> {
    fn from_resume(resume: &'a ResumeRecord) -> Self {
        let bullets = &resume.bullet_points;
        Self {
            name: &resume.filename,
            skills: resume.all_skills(),
            highlights: &resume.impact_metrics,
            experience: &bullets[..bullets.len().min(EXPERIENCE_BULLETS)],
        }
    }
}

#[derive(Debug, Serialize)]
struct TargetJob<'a> {
    title: &'a str,
    company: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

impl<'a> TargetJob<'a> {
    fn from_job(jd: Option<&'a JobDescriptionRecord>) -> Self {
        match jd {
            Some(jd) => Self {
                title: &jd.title,
                company: &jd.company,
                text: Some(truncate_chars(&jd.raw_text, JD_TEXT_BUDGET)),
            },
            None => Self {
                title: DEFAULT_TITLE,
                company: DEFAULT_COMPANY,
                text: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetter {
    pub cover_letter: String,
}

fn build_prompt(resume: &ResumeRecord, jd: Option<&JobDescriptionRecord>) -> String {
    fill_template(
        COVER_LETTER_PROMPT,
        &[
            (
                "{candidate}",
                to_prompt_json(&CandidateContext::from_resume(resume)).as_str(),
            ),
            ("{job}", to_prompt_json(&TargetJob::from_job(jd)).as_str()),
        ],
    )
}

pub async fn generate_cover_letter(
    llm: &LlmClient,
    resume: &ResumeRecord,
    jd: Option<&JobDescriptionRecord>,
) -> Result<CoverLetter, AppError> {
    llm.call_json(&ModelRequest::json(build_prompt(resume, jd)))
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))
}
