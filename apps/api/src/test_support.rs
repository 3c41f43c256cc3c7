//! Fixtures shared by the unit tests.

use std::sync::Arc;

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::testing::ScriptedTransport;
use crate::models::interview::Exchange;
use crate::models::job::JobDescriptionRecord;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::store::SessionStore;

/// A resume with analysis lists but no structured sections.
pub fn sample_resume() -> ResumeRecord {
    let now = Utc::now();
    ResumeRecord {
        id: Uuid::new_v4(),
        filename: "jane_doe.pdf".into(),
        content_type: "application/pdf".into(),
        size: 2048,
        storage_key: None,
        raw_text: "Jane Doe\nBackend engineer. Built a billing API in Rust serving 2M requests/day."
            .into(),
        ats_score: Some(71.0),
        strengths: vec!["Quantified impact".into()],
        weaknesses: vec!["No summary".into()],
        keywords: vec!["Rust".into(), "PostgreSQL".into()],
        skills: vec!["Rust".into(), "PostgreSQL".into()],
        tech_skills: vec!["Rust".into(), "PostgreSQL".into()],
        soft_skills: vec!["Communication".into()],
        projects: Json(vec![]),
        work_experience: Json(vec![]),
        leadership: Json(vec![]),
        education: Json(vec![]),
        impact_metrics: vec!["2M requests/day".into()],
        domain: Some("Backend".into()),
        bullet_points: vec!["Built a billing API in Rust".into()],
        rewritten: None,
        comparison_note: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_job() -> JobDescriptionRecord {
    JobDescriptionRecord {
        id: Uuid::new_v4(),
        title: "Senior Backend Engineer".into(),
        company: "Globex".into(),
        raw_text: "Globex is hiring a Senior Backend Engineer. Rust, Kafka, PostgreSQL.".into(),
        required_skills: vec!["Rust".into(), "Kafka".into()],
        preferred_skills: vec!["PostgreSQL".into()],
        role_focus: "Backend".into(),
        seniority_level: "Senior".into(),
        hidden_signals: vec!["On-call rotation".into()],
        created_at: Utc::now(),
    }
}

pub fn sample_exchange(question_type: &str, score: f64) -> Exchange {
    Exchange {
        question: "Walk me through your billing API.".into(),
        answer: "I designed the schema and owned the rollout.".into(),
        question_type: question_type.into(),
        feedback: "Good ownership.".into(),
        score,
        improvements: "Better way to say this: add numbers.".into(),
        red_flags: vec![],
        star_analysis: None,
        timestamp: Utc::now(),
    }
}

/// A store holding one `sample_resume` and one `sample_job`.
pub async fn seeded_store() -> (Arc<MemoryStore>, ResumeRecord, JobDescriptionRecord) {
    let store = Arc::new(MemoryStore::new());
    let resume = sample_resume();
    let jd = sample_job();
    store.insert_resume(&resume).await.unwrap();
    store.insert_job_description(&jd).await.unwrap();
    (store, resume, jd)
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".into(),
        gemini_api_key: "test-key".into(),
        gemini_model: "test-model".into(),
        port: 0,
        max_upload_bytes: 64 * 1024,
        rust_log: "debug".into(),
        archive: None,
    }
}

pub fn test_state(transport: &Arc<ScriptedTransport>, store: Arc<MemoryStore>) -> AppState {
    AppState {
        store,
        llm: transport.client(),
        archive: None,
        config: test_config(),
    }
}
