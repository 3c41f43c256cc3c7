use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::interview::{Exchange, InterviewSession, SessionCompletion, SessionStatus};
use crate::models::job::{JobDescriptionRecord, MatchRecord};
use crate::models::resume::{ResumeRecord, ResumeRewriteUpdate};
use crate::models::user::{InterviewProfile, UserRecord};
use crate::store::{SessionStore, StoreResult, UserUpsert};

/// In-process store with the same guard semantics as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<HashMap<Uuid, ResumeRecord>>,
    jobs: Mutex<HashMap<Uuid, JobDescriptionRecord>>,
    matches: Mutex<Vec<MatchRecord>>,
    sessions: Mutex<HashMap<Uuid, InterviewSession>>,
    users: Mutex<Vec<UserRecord>>,
    profiles: Mutex<HashMap<Uuid, InterviewProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_count(&self) -> usize {
        self.matches.lock().unwrap().len()
    }
}

fn new_profile(user_id: Uuid) -> InterviewProfile {
    let now = Utc::now();
    InterviewProfile {
        id: Uuid::new_v4(),
        user_id,
        target_role: None,
        target_company: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_resume(&self, resume: &ResumeRecord) -> StoreResult<()> {
        self.resumes.lock().unwrap().insert(resume.id, resume.clone());
        Ok(())
    }

    async fn get_resume(&self, id: Uuid) -> StoreResult<Option<ResumeRecord>> {
        Ok(self.resumes.lock().unwrap().get(&id).cloned())
    }

    async fn apply_resume_rewrite(
        &self,
        id: Uuid,
        update: &ResumeRewriteUpdate,
    ) -> StoreResult<Option<ResumeRecord>> {
        let mut resumes = self.resumes.lock().unwrap();
        Ok(resumes.get_mut(&id).map(|record| {
            update.apply_to(record);
            record.clone()
        }))
    }

    async fn insert_job_description(&self, jd: &JobDescriptionRecord) -> StoreResult<()> {
        self.jobs.lock().unwrap().insert(jd.id, jd.clone());
        Ok(())
    }

    async fn get_job_description(&self, id: Uuid) -> StoreResult<Option<JobDescriptionRecord>> {
        Ok(self.jobs.lock().unwrap().get(&id).cloned())
    }

    async fn find_match(
        &self,
        resume_id: Uuid,
        job_description_id: Uuid,
    ) -> StoreResult<Option<MatchRecord>> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.resume_id == resume_id && m.job_description_id == job_description_id)
            .cloned())
    }

    async fn insert_match(&self, record: &MatchRecord) -> StoreResult<MatchRecord> {
        let mut matches = self.matches.lock().unwrap();
        if let Some(existing) = matches.iter().find(|m| {
            m.resume_id == record.resume_id && m.job_description_id == record.job_description_id
        }) {
            return Ok(existing.clone());
        }
        matches.push(record.clone());
        Ok(record.clone())
    }

    async fn insert_session(&self, session: &InterviewSession) -> StoreResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn get_session(&self, id: Uuid) -> StoreResult<Option<InterviewSession>> {
        Ok(self.sessions.lock().unwrap().get(&id).cloned())
    }

    async fn append_exchange(
        &self,
        id: Uuid,
        expected_rounds: usize,
        exchange: &Exchange,
    ) -> StoreResult<bool> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(&id) {
            Some(session)
                if session.status == SessionStatus::InProgress
                    && session.exchanges.len() == expected_rounds =>
            {
                session.exchanges.push(exchange.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn complete_session(
        &self,
        id: Uuid,
        completion: &SessionCompletion,
    ) -> StoreResult<bool> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(&id) {
            Some(session) if session.status == SessionStatus::InProgress => {
                session.status = SessionStatus::Completed;
                session.overall_score = Some(completion.overall_score);
                session.feedback_summary = Some(completion.feedback_summary.clone());
                session.report = Some(completion.report.clone());
                session.end_time = Some(completion.end_time);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn upsert_user(&self, user: &UserUpsert) -> StoreResult<(UserRecord, bool)> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.email == user.email) {
            if let Some(name) = &user.name {
                existing.name = Some(name.clone());
            }
            if let Some(image) = &user.image {
                existing.image = Some(image.clone());
            }
            return Ok((existing.clone(), false));
        }
        let created = UserRecord {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            name: user.name.clone(),
            image: user.image.clone(),
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok((created, true))
    }

    async fn first_user(&self) -> StoreResult<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().first().cloned())
    }

    async fn create_user(&self, user: &UserUpsert) -> StoreResult<UserRecord> {
        let created = UserRecord {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            name: user.name.clone(),
            image: user.image.clone(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get_or_create_profile(&self, user_id: Uuid) -> StoreResult<InterviewProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .entry(user_id)
            .or_insert_with(|| new_profile(user_id))
            .clone())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        target_role: Option<&str>,
        target_company: Option<&str>,
    ) -> StoreResult<InterviewProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .entry(user_id)
            .or_insert_with(|| new_profile(user_id));
        if let Some(role) = target_role {
            profile.target_role = Some(role.to_string());
        }
        if let Some(company) = target_company {
            profile.target_company = Some(company.to_string());
        }
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}
