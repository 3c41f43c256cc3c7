use crate::errors::AppError;
use crate::interview::prompts::REPORT_PROMPT;
use crate::llm_client::prompts::{fill_template, to_prompt_json};
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::interview::{Exchange, InterviewReport};

pub async fn generate_report(
    llm: &LlmClient,
    history: &[Exchange],
    interview_type: &str,
) -> Result<InterviewReport, AppError> {
    let history = to_prompt_json(&history);
    let prompt = fill_template(
        REPORT_PROMPT,
        &[("{type}", interview_type), ("{history}", history.as_str())],
    );

    let mut report: InterviewReport = llm
        .call_json(&ModelRequest::json(prompt))
        .await
        .map_err(|e| AppError::Llm(format!("Report generation failed: {e}")))?;

    report.overall_score = report.overall_score.clamp(0.0, 100.0);
    for topic in &mut report.heatmap {
        topic.score = topic.score.clamp(0.0, 100.0);
    }
    Ok(report)
}
