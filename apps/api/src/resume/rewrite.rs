//! Resume rewriting in two modes.
//!
//! - Plain: free text in, summary / bullets / keywords out.
//! - Sections: a stored resume with structured entries is rewritten item by item.
//!   The output must keep the same number of items per section and the same number
//!   of bullets per item. Item-count drift gets one corrective retry; whatever drift
//!   is left is reported in `structureWarnings`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{
    fill_template, to_prompt_json, truncate_chars, JD_TEXT_BUDGET, RESUME_TEXT_BUDGET,
};
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::job::JobDescriptionRecord;
use crate::models::resume::{ResumeRecord, ResumeRewriteUpdate};
use crate::resume::prompts::{
    ITEM_COUNT_REMINDER, PLAIN_REWRITE_PROMPT, SECTIONS_REWRITE_PROMPT, TAILORING_BLOCK,
};

pub enum RewriteSource<'a> {
    Text(&'a str),
    Stored(&'a ResumeRecord),
}

/// Job description summary appended to targeted rewrites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoringContext {
    pub title: String,
    pub required: Vec<String>,
    pub role_focus: String,
    pub text: String,
}

impl TailoringContext {
    pub fn from_job(jd: &JobDescriptionRecord) -> Self {
        Self {
            title: jd.title.clone(),
            required: jd.required_skills.clone(),
            role_focus: jd.role_focus.clone(),
            text: truncate_chars(&jd.raw_text, JD_TEXT_BUDGET).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlainRewrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_full: Option<String>,
}

// ── Sections mode ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkItem {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub name: String,
    pub tech: String,
    pub description: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadershipItem {
    pub role: String,
    pub organization: String,
    pub bullets: Vec<String>,
}

/// Used both for the prompt input and for the model's answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeSections {
    pub work_experience: Vec<WorkItem>,
    pub projects: Vec<ProjectItem>,
    pub leadership: Vec<LeadershipItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionsRewrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<String>,
    #[serde(flatten)]
    pub sections: ResumeSections,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub structure_warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RewriteOutcome {
    Plain(PlainRewrite),
    Sections(SectionsRewrite),
}

impl RewriteOutcome {
    /// Only fields the rewrite actually produced are written back.
    pub fn to_update(&self) -> ResumeRewriteUpdate {
        match self {
            RewriteOutcome::Plain(p) => ResumeRewriteUpdate {
                rewritten: p.rewritten_full.clone().or_else(|| p.rewritten.clone()),
                bullet_points: p.bullet_points.clone(),
                keywords: p.keywords.clone(),
                skills: p.skills.clone(),
            },
            RewriteOutcome::Sections(s) => ResumeRewriteUpdate {
                rewritten: s.rewritten.clone(),
                ..Default::default()
            },
        }
    }
}

/// Description lines become the input bullets; leading list markers are dropped.
fn description_bullets(description: &str) -> Vec<String> {
    description
        .lines()
        .map(|line| line.trim().trim_start_matches(['•', '-', '*', '▪']).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl ResumeSections {
    pub fn from_record(record: &ResumeRecord) -> Self {
        Self {
            work_experience: record
                .work_experience
                .0
                .iter()
                .map(|w| WorkItem {
                    role: w.role.clone(),
                    company: w.company.clone(),
                    duration: w.duration.clone(),
                    description: w.description.clone(),
                    bullets: description_bullets(&w.description),
                })
                .collect(),
            projects: record
                .projects
                .0
                .iter()
                .map(|p| ProjectItem {
                    name: p.name.clone(),
                    tech: p.tech.clone(),
                    description: p.description.clone(),
                    bullets: description_bullets(&p.description),
                })
                .collect(),
            leadership: record
                .leadership
                .0
                .iter()
                .map(|l| LeadershipItem {
                    role: l.role.clone(),
                    organization: l.organization.clone(),
                    bullets: description_bullets(&l.description),
                })
                .collect(),
        }
    }

    fn item_counts(&self) -> [(&'static str, usize); 3] {
        [
            ("workExperience", self.work_experience.len()),
            ("projects", self.projects.len()),
            ("leadership", self.leadership.len()),
        ]
    }

    fn bullet_counts(&self) -> Vec<(&'static str, Vec<usize>)> {
        vec![
            (
                "workExperience",
                self.work_experience.iter().map(|i| i.bullets.len()).collect(),
            ),
            (
                "projects",
                self.projects.iter().map(|i| i.bullets.len()).collect(),
            ),
            (
                "leadership",
                self.leadership.iter().map(|i| i.bullets.len()).collect(),
            ),
        ]
    }

    fn expected_summary(&self) -> String {
        self.item_counts()
            .iter()
            .map(|(name, n)| format!("{n} {name} items"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Sections whose item count differs from the input.
pub fn item_count_drift(input: &ResumeSections, output: &ResumeSections) -> Vec<String> {
    input
        .item_counts()
        .iter()
        .zip(output.item_counts().iter())
        .filter(|((_, want), (_, got))| want != got)
        .map(|((name, want), (_, got))| format!("{name}: expected {want} items, got {got}"))
        .collect()
}

/// Items whose bullet count differs from the input. Items without input bullets
/// and items past the end of either list are not compared.
pub fn bullet_count_drift(input: &ResumeSections, output: &ResumeSections) -> Vec<String> {
    let mut warnings = Vec::new();
    for ((name, want), (_, got)) in input.bullet_counts().into_iter().zip(output.bullet_counts()) {
        for (idx, (w, g)) in want.iter().zip(got.iter()).enumerate() {
            if *w > 0 && w != g {
                warnings.push(format!("{name}[{idx}]: expected {w} bullets, got {g}"));
            }
        }
    }
    warnings
}

fn with_tailoring(prompt: String, jd: Option<&TailoringContext>) -> String {
    match jd {
        Some(jd) => {
            let tailoring = fill_template(TAILORING_BLOCK, &[("{jd}", to_prompt_json(jd).as_str())]);
            prompt + &tailoring
        }
        None => prompt,
    }
}

pub async fn rewrite_resume(
    llm: &LlmClient,
    source: RewriteSource<'_>,
    jd: Option<&TailoringContext>,
) -> Result<RewriteOutcome, AppError> {
    match source {
        RewriteSource::Stored(record) if record.has_structured_sections() => {
            rewrite_sections(llm, &ResumeSections::from_record(record), jd)
                .await
                .map(RewriteOutcome::Sections)
        }
        RewriteSource::Stored(record) => rewrite_plain(llm, &record.raw_text, jd)
            .await
            .map(RewriteOutcome::Plain),
        RewriteSource::Text(text) => rewrite_plain(llm, text, jd)
            .await
            .map(RewriteOutcome::Plain),
    }
}

async fn rewrite_plain(
    llm: &LlmClient,
    text: &str,
    jd: Option<&TailoringContext>,
) -> Result<PlainRewrite, AppError> {
    let request = ModelRequest::json(with_tailoring(PLAIN_REWRITE_PROMPT.to_string(), jd))
        .with_text(format!(
            "RESUME_CONTENT:\n{}",
            truncate_chars(text, RESUME_TEXT_BUDGET)
        ));

    llm.call_json(&request)
        .await
        .map_err(|e| AppError::Llm(format!("Resume rewrite failed: {e}")))
}

async fn rewrite_sections(
    llm: &LlmClient,
    input: &ResumeSections,
    jd: Option<&TailoringContext>,
) -> Result<SectionsRewrite, AppError> {
    let prompt = with_tailoring(
        fill_template(
            SECTIONS_REWRITE_PROMPT,
            &[("{sections}", to_prompt_json(input).as_str())],
        ),
        jd,
    );

    let mut output = call_sections(llm, prompt.clone()).await?;

    let drift = item_count_drift(input, &output.sections);
    if !drift.is_empty() {
        warn!("Sections rewrite changed item counts ({}), retrying once", drift.join("; "));
        let expected = input.expected_summary();
        let reminder = fill_template(ITEM_COUNT_REMINDER, &[("{expected}", expected.as_str())]);
        output = call_sections(llm, prompt + &reminder).await?;
    }

    let mut warnings = item_count_drift(input, &output.sections);
    warnings.extend(bullet_count_drift(input, &output.sections));
    if !warnings.is_empty() {
        info!("Sections rewrite returned with {} structure warning(s)", warnings.len());
    }
    output.structure_warnings = warnings;
    Ok(output)
}

async fn call_sections(llm: &LlmClient, prompt: String) -> Result<SectionsRewrite, AppError> {
    llm.call_json(&ModelRequest::json(prompt))
        .await
        .map_err(|e| AppError::Llm(format!("Resume rewrite failed: {e}")))
}
