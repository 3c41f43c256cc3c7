use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::prompts::{EVALUATION_PROMPT, STAR_PROMPT};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::interview::StarAnalysis;

pub const DEFAULT_QUESTION_TYPE: &str = "General";

/// Question types that also get a STAR completeness check.
const STAR_QUESTION_TYPES: [&str; 2] = ["Behavioral", "Resume Deep-Dive"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerEvaluation {
    pub score: f64,
    pub feedback: String,
    pub improvements: String,
    pub red_flags: Vec<String>,
}

pub fn requires_star(question_type: &str) -> bool {
    STAR_QUESTION_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(question_type.trim()))
}

pub async fn evaluate_answer(
    llm: &LlmClient,
    question: &str,
    answer: &str,
    question_type: &str,
) -> Result<AnswerEvaluation, AppError> {
    let prompt = fill_template(
        EVALUATION_PROMPT,
        &[
            ("{type}", question_type),
            ("{question}", question),
            ("{answer}", answer),
        ],
    );

    let mut evaluation: AnswerEvaluation = llm
        .call_json(&ModelRequest::json(prompt))
        .await
        .map_err(|e| AppError::Llm(format!("Answer evaluation failed: {e}")))?;
    evaluation.score = evaluation.score.clamp(0.0, 100.0);
    Ok(evaluation)
}

pub async fn analyze_star(
    llm: &LlmClient,
    question: &str,
    answer: &str,
) -> Result<StarAnalysis, AppError> {
    let prompt = fill_template(
        STAR_PROMPT,
        &[("{question}", question), ("{answer}", answer)],
    );

    let mut star: StarAnalysis = llm
        .call_json(&ModelRequest::json(prompt))
        .await
        .map_err(|e| AppError::Llm(format!("STAR analysis failed: {e}")))?;
    star.star_score = star.star_score.clamp(0.0, 100.0);
    Ok(star)
}
