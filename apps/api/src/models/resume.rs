use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub tech: String,
    pub description: String,
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadershipEntry {
    pub role: String,
    pub organization: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub year: String,
}

/// An uploaded resume plus everything the analysis derived from it.
/// `skills` is the reconciled skill list (new split schema first, legacy list second).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    pub storage_key: Option<String>,
    pub raw_text: String,
    pub ats_score: Option<f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub keywords: Vec<String>,
    pub skills: Vec<String>,
    pub tech_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub projects: Json<Vec<ProjectEntry>>,
    pub work_experience: Json<Vec<WorkExperienceEntry>>,
    pub leadership: Json<Vec<LeadershipEntry>>,
    pub education: Json<Vec<EducationEntry>>,
    pub impact_metrics: Vec<String>,
    pub domain: Option<String>,
    pub bullet_points: Vec<String>,
    pub rewritten: Option<String>,
    pub comparison_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn has_structured_sections(&self) -> bool {
        !self.work_experience.0.is_empty()
            || !self.projects.0.is_empty()
            || !self.leadership.0.is_empty()
    }

    /// Technical skills followed by soft skills.
    pub fn all_skills(&self) -> Vec<String> {
        self.tech_skills
            .iter()
            .chain(self.soft_skills.iter())
            .cloned()
            .collect()
    }
}

/// Fields a rewrite may overwrite. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeRewriteUpdate {
    pub rewritten: Option<String>,
    pub bullet_points: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
}

impl ResumeRewriteUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(&self, record: &mut ResumeRecord) {
        if let Some(rewritten) = &self.rewritten {
            record.rewritten = Some(rewritten.clone());
        }
        if let Some(bullets) = &self.bullet_points {
            record.bullet_points = bullets.clone();
        }
        if let Some(keywords) = &self.keywords {
            record.keywords = keywords.clone();
        }
        if let Some(skills) = &self.skills {
            record.skills = skills.clone();
        }
        record.updated_at = Utc::now();
    }
}
