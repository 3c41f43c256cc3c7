//! Persistence boundary for every document the service owns.
//!
//! Handlers only see `Arc<dyn SessionStore>`; production wires [`PgStore`],
//! tests wire the in-memory store.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::interview::{Exchange, InterviewSession, SessionCompletion};
use crate::models::job::{JobDescriptionRecord, MatchRecord};
use crate::models::resume::{ResumeRecord, ResumeRewriteUpdate};
use crate::models::user::{InterviewProfile, UserRecord};

pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Fields accepted by the user sync endpoint. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserUpsert {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn insert_resume(&self, resume: &ResumeRecord) -> StoreResult<()>;
    async fn get_resume(&self, id: Uuid) -> StoreResult<Option<ResumeRecord>>;
    /// Returns the updated record, or `None` if the resume does not exist.
    async fn apply_resume_rewrite(
        &self,
        id: Uuid,
        update: &ResumeRewriteUpdate,
    ) -> StoreResult<Option<ResumeRecord>>;

    async fn insert_job_description(&self, jd: &JobDescriptionRecord) -> StoreResult<()>;
    async fn get_job_description(&self, id: Uuid) -> StoreResult<Option<JobDescriptionRecord>>;

    async fn find_match(
        &self,
        resume_id: Uuid,
        job_description_id: Uuid,
    ) -> StoreResult<Option<MatchRecord>>;
    /// Stores `record` unless the pair already has a match. Returns whichever
    /// record is stored for the pair afterwards.
    async fn insert_match(&self, record: &MatchRecord) -> StoreResult<MatchRecord>;

    async fn insert_session(&self, session: &InterviewSession) -> StoreResult<()>;
    async fn get_session(&self, id: Uuid) -> StoreResult<Option<InterviewSession>>;
    /// Appends one exchange if the session is still IN_PROGRESS and holds
    /// exactly `expected_rounds` exchanges. `false` means nothing was written.
    async fn append_exchange(
        &self,
        id: Uuid,
        expected_rounds: usize,
        exchange: &Exchange,
    ) -> StoreResult<bool>;
    /// Moves an IN_PROGRESS session to COMPLETED. `false` if it was not IN_PROGRESS.
    async fn complete_session(&self, id: Uuid, completion: &SessionCompletion)
        -> StoreResult<bool>;

    /// Returns the user and whether it was newly created.
    async fn upsert_user(&self, user: &UserUpsert) -> StoreResult<(UserRecord, bool)>;
    /// Oldest user, used as the implicit account for the profile page.
    async fn first_user(&self) -> StoreResult<Option<UserRecord>>;
    async fn create_user(&self, user: &UserUpsert) -> StoreResult<UserRecord>;

    async fn get_or_create_profile(&self, user_id: Uuid) -> StoreResult<InterviewProfile>;
    /// `None` targets keep the stored value. Creates the profile if missing.
    async fn update_profile(
        &self,
        user_id: Uuid,
        target_role: Option<&str>,
        target_company: Option<&str>,
    ) -> StoreResult<InterviewProfile>;
}
