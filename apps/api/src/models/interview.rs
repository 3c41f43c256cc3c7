use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Interview rounds per session. A session with this many exchanges is done.
pub const MAX_ROUNDS: usize = 5;
pub const DEFAULT_INTERVIEW_TYPE: &str = "SCREENING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "IN_PROGRESS",
            SessionStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(SessionStatus::InProgress),
            "COMPLETED" => Ok(SessionStatus::Completed),
            other => Err(format!("unknown session status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// STAR rubric check of a behavioral answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarAnalysis {
    pub has_situation: bool,
    pub has_task: bool,
    pub has_action: bool,
    pub has_result: bool,
    pub missing_components: Vec<String>,
    /// 0 – 100
    pub star_score: f64,
    pub rewrite_suggestion: String,
}

/// One answered round. Appended in round order, never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub feedback: String,
    pub score: f64,
    pub improvements: String,
    #[serde(default)]
    pub red_flags: Vec<String>,
    pub star_analysis: Option<StarAnalysis>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicScore {
    pub topic: String,
    pub score: f64,
}

/// Final report produced when an interview is closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewReport {
    pub overall_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// "High" | "Medium" | "Low"
    pub readiness_level: String,
    pub heatmap: Vec<TopicScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_description_id: Uuid,
    pub company: String,
    pub role: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub difficulty: Difficulty,
    pub status: SessionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exchanges: Vec<Exchange>,
    pub overall_score: Option<f64>,
    pub feedback_summary: Option<String>,
    pub report: Option<InterviewReport>,
}

impl InterviewSession {
    /// Answered rounds so far. Derived, never stored on its own.
    pub fn round_count(&self) -> usize {
        self.exchanges.len()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.exchanges.iter().map(|e| e.score).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Completed || self.round_count() >= MAX_ROUNDS
    }
}

/// Values written once when a session moves to COMPLETED.
#[derive(Debug, Clone)]
pub struct SessionCompletion {
    pub overall_score: f64,
    pub feedback_summary: String,
    pub report: InterviewReport,
    pub end_time: DateTime<Utc>,
}
