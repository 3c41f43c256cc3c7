//! Resume analysis: attachment + extracted text in, typed analysis out.
//!
//! The model has emitted two skill layouts over time. Older answers carry a
//! single `skills` list, newer ones split it into `techSkills` / `softSkills`.
//! [`RawResumeAnalysis::reconcile`] folds both into one [`ResumeAnalysis`].

use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::llm_client::prompts::{truncate_chars, RESUME_TEXT_BUDGET};
use crate::llm_client::{LlmClient, ModelRequest};
use crate::models::resume::{
    EducationEntry, LeadershipEntry, ProjectEntry, ResumeRecord, WorkExperienceEntry,
};
use crate::resume::prompts::RESUME_ANALYSIS_PROMPT;

/// The model's answer exactly as received. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawResumeAnalysis {
    pub ats_score: Option<f64>,
    pub strengths: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    /// Legacy single list.
    pub skills: Option<Vec<String>>,
    pub tech_skills: Option<Vec<String>>,
    pub soft_skills: Option<Vec<String>>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub work_experience: Option<Vec<WorkExperienceEntry>>,
    pub leadership: Option<Vec<LeadershipEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub impact_metrics: Option<Vec<String>>,
    pub domain: Option<String>,
    pub bullet_points: Option<Vec<String>>,
    pub rewritten: Option<String>,
    pub comparison_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillSchema {
    /// `techSkills` present (with or without `softSkills`).
    Split,
    /// Only the flat `skills` list.
    Legacy,
    Missing,
}

/// Analysis with every list resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeAnalysis {
    pub ats_score: Option<f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub keywords: Vec<String>,
    pub skills: Vec<String>,
    pub tech_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub leadership: Vec<LeadershipEntry>,
    pub education: Vec<EducationEntry>,
    pub impact_metrics: Vec<String>,
    pub domain: Option<String>,
    pub bullet_points: Vec<String>,
    pub rewritten: Option<String>,
    pub comparison_note: Option<String>,
}

impl RawResumeAnalysis {
    pub fn skill_schema(&self) -> SkillSchema {
        if self.tech_skills.is_some() {
            SkillSchema::Split
        } else if self.skills.is_some() {
            SkillSchema::Legacy
        } else {
            SkillSchema::Missing
        }
    }

    pub fn reconcile(self) -> ResumeAnalysis {
        let skills = match self.skill_schema() {
            SkillSchema::Split => self.tech_skills.clone().unwrap_or_default(),
            SkillSchema::Legacy => self.skills.clone().unwrap_or_default(),
            SkillSchema::Missing => Vec::new(),
        };

        ResumeAnalysis {
            ats_score: self.ats_score.map(|s| s.clamp(0.0, 100.0)),
            strengths: self.strengths.unwrap_or_default(),
            weaknesses: self.weaknesses.unwrap_or_default(),
            keywords: self.keywords.unwrap_or_default(),
            skills,
            tech_skills: self.tech_skills.unwrap_or_default(),
            soft_skills: self.soft_skills.unwrap_or_default(),
            projects: self.projects.unwrap_or_default(),
            work_experience: self.work_experience.unwrap_or_default(),
            leadership: self.leadership.unwrap_or_default(),
            education: self.education.unwrap_or_default(),
            impact_metrics: self.impact_metrics.unwrap_or_default(),
            domain: self.domain,
            bullet_points: self.bullet_points.unwrap_or_default(),
            rewritten: self.rewritten,
            comparison_note: self.comparison_note,
        }
    }
}

impl ResumeAnalysis {
    pub fn into_record(
        self,
        id: Uuid,
        doc: &UploadedDocument,
        raw_text: String,
        storage_key: Option<String>,
    ) -> ResumeRecord {
        let now = Utc::now();
        ResumeRecord {
            id,
            filename: doc.filename.clone(),
            content_type: doc.content_type.clone(),
            size: doc.bytes.len() as i64,
            storage_key,
            raw_text,
            ats_score: self.ats_score,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            keywords: self.keywords,
            skills: self.skills,
            tech_skills: self.tech_skills,
            soft_skills: self.soft_skills,
            projects: Json(self.projects),
            work_experience: Json(self.work_experience),
            leadership: Json(self.leadership),
            education: Json(self.education),
            impact_metrics: self.impact_metrics,
            domain: self.domain,
            bullet_points: self.bullet_points,
            rewritten: self.rewritten,
            comparison_note: self.comparison_note,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sends the original file plus its truncated text.
pub async fn analyze_resume(
    llm: &LlmClient,
    doc: &UploadedDocument,
    raw_text: &str,
) -> Result<ResumeAnalysis, AppError> {
    let request = ModelRequest::json(RESUME_ANALYSIS_PROMPT)
        .with_attachment(doc.mime_type(), doc.bytes.clone())
        .with_text(format!(
            "RESUME_TEXT:\n{}",
            truncate_chars(raw_text, RESUME_TEXT_BUDGET)
        ));

    let raw: RawResumeAnalysis = llm
        .call_json(&request)
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

    Ok(raw.reconcile())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedTransport;
    use crate::llm_client::Part;
    use bytes::Bytes;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawResumeAnalysis {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_legacy_skills_are_used_when_split_is_missing() {
        let raw = parse(json!({ "skills": ["Go"] }));
        assert_eq!(raw.skill_schema(), SkillSchema::Legacy);
        let analysis = raw.reconcile();
        assert_eq!(analysis.skills, vec!["Go"]);
        assert!(analysis.tech_skills.is_empty());
        assert!(analysis.soft_skills.is_empty());
    }

    #[test]
    fn test_tech_skills_win_over_legacy() {
        let raw = parse(json!({
            "skills": ["Go"],
            "techSkills": ["Rust", "Postgres"],
            "softSkills": ["Mentoring"]
        }));
        assert_eq!(raw.skill_schema(), SkillSchema::Split);
        let analysis = raw.reconcile();
        assert_eq!(analysis.skills, vec!["Rust", "Postgres"]);
        assert_eq!(analysis.soft_skills, vec!["Mentoring"]);
    }

    #[test]
    fn test_missing_everything_defaults_to_empty() {
        let raw = parse(json!({}));
        assert_eq!(raw.skill_schema(), SkillSchema::Missing);
        let analysis = raw.reconcile();
        assert_eq!(analysis, ResumeAnalysis::default());
    }

    #[test]
    fn test_nulls_are_treated_as_absent() {
        let raw = parse(json!({ "techSkills": null, "skills": ["C"], "strengths": null }));
        let analysis = raw.reconcile();
        assert_eq!(analysis.skills, vec!["C"]);
        assert!(analysis.strengths.is_empty());
    }

    #[test]
    fn test_ats_score_is_clamped() {
        assert_eq!(parse(json!({ "atsScore": 140 })).reconcile().ats_score, Some(100.0));
    }

    #[tokio::test]
    async fn test_analyze_sends_attachment_and_truncated_text() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({ "atsScore": 72, "skills": ["Go"] }));
        let doc = UploadedDocument {
            filename: "cv.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: Bytes::from_static(b"%PDF-1.7"),
        };
        let long_text = "x".repeat(RESUME_TEXT_BUDGET + 500);

        let analysis = analyze_resume(&transport.client(), &doc, &long_text)
            .await
            .unwrap();
        assert_eq!(analysis.skills, vec!["Go"]);
        assert_eq!(analysis.ats_score, Some(72.0));

        let request = &transport.requests()[0];
        assert!(request.json_response);
        assert!(matches!(
            &request.parts[1],
            Part::InlineData { mime_type, .. } if mime_type == "application/pdf"
        ));
        match &request.parts[2] {
            Part::Text(text) => {
                assert_eq!(text.len(), "RESUME_TEXT:\n".len() + RESUME_TEXT_BUDGET)
            }
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_model_failure_is_llm_error() {
        let transport = ScriptedTransport::new();
        transport.push_status(400, "bad request");
        let doc = UploadedDocument {
            filename: "cv.txt".into(),
            content_type: "text/plain".into(),
            bytes: Bytes::from_static(b"hello"),
        };
        let err = analyze_resume(&transport.client(), &doc, "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(msg) if msg.contains("400")));
    }
}
