//! Quick job-posting briefing, optionally personalised with a resume. Not persisted.
//!
//! Runs in free-text mode at a slightly higher temperature; the JSON object is
//! salvaged from whatever prose the model wraps around it. An answer with no
//! usable object yields an empty briefing rather than an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::job::prompts::JOB_INTEL_PROMPT;
use crate::llm_client::prompts::{
    fill_template, truncate_chars, JSON_ONLY_INSTRUCTION, RESUME_TEXT_BUDGET,
};
use crate::llm_client::{LlmClient, LlmError, ModelRequest};

const JOB_INTEL_TEMPERATURE: f32 = 0.35;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobIntel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub job_data: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_resume: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resume_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tailored_bullets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<String>,
}

fn build_prompt(job_description: &str, resume_text: Option<&str>) -> String {
    let resume_block = match resume_text {
        Some(resume) => format!(
            "Candidate Resume:\n\"\"\"\n{}\n\"\"\"\n",
            truncate_chars(resume, RESUME_TEXT_BUDGET)
        ),
        None => String::new(),
    };
    let mut prompt = fill_template(
        JOB_INTEL_PROMPT,
        &[
            ("{job_description}", job_description),
            ("{resume_block}", resume_block.as_str()),
        ],
    );
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt
}

pub async fn job_intel(
    llm: &LlmClient,
    job_description: &str,
    resume_text: Option<&str>,
) -> Result<JobIntel, AppError> {
    let request = ModelRequest::free_text(build_prompt(job_description, resume_text))
        .with_temperature(JOB_INTEL_TEMPERATURE);

    match llm.call_json::<JobIntel>(&request).await {
        Ok(intel) => Ok(intel),
        Err(e @ (LlmError::NonJson | LlmError::Shape(_))) => {
            warn!("Job intel answer was not usable JSON, returning empty briefing: {e}");
            Ok(JobIntel::default())
        }
        Err(e) => Err(AppError::Llm(format!("Job intel failed: {e}"))),
    }
}
