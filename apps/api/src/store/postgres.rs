use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::models::interview::{
    Exchange, InterviewReport, InterviewSession, SessionCompletion, SessionStatus,
};
use crate::models::job::{JobDescriptionRecord, MatchRecord};
use crate::models::resume::{ResumeRecord, ResumeRewriteUpdate};
use crate::models::user::{InterviewProfile, UserRecord};
use crate::store::{SessionStore, StoreResult, UserUpsert};

/// Postgres-backed store. Nested documents live in JSONB, string lists in TEXT[].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw `interview_sessions` row before enum columns are decoded.
#[derive(Debug, FromRow)]
struct SessionRow {
    id: Uuid,
    resume_id: Uuid,
    job_description_id: Uuid,
    company: String,
    role: String,
    interview_type: String,
    difficulty: String,
    status: String,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    exchanges: Json<Vec<Exchange>>,
    overall_score: Option<f64>,
    feedback_summary: Option<String>,
    report: Option<Json<InterviewReport>>,
}

impl TryFrom<SessionRow> for InterviewSession {
    type Error = sqlx::Error;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(InterviewSession {
            id: row.id,
            resume_id: row.resume_id,
            job_description_id: row.job_description_id,
            company: row.company,
            role: row.role,
            interview_type: row.interview_type,
            difficulty: row.difficulty.parse().map_err(decode_error)?,
            status: row.status.parse().map_err(decode_error)?,
            start_time: row.start_time,
            end_time: row.end_time,
            exchanges: row.exchanges.0,
            overall_score: row.overall_score,
            feedback_summary: row.feedback_summary,
            report: row.report.map(|r| r.0),
        })
    }
}

fn decode_error(message: String) -> sqlx::Error {
    sqlx::Error::Decode(message.into())
}

#[async_trait]
impl SessionStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_resume(&self, resume: &ResumeRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO resumes
                (id, filename, content_type, size, storage_key, raw_text, ats_score,
                 strengths, weaknesses, keywords, skills, tech_skills, soft_skills,
                 projects, work_experience, leadership, education, impact_metrics,
                 domain, bullet_points, rewritten, comparison_note, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            "#,
        )
        .bind(resume.id)
        .bind(&resume.filename)
        .bind(&resume.content_type)
        .bind(resume.size)
        .bind(&resume.storage_key)
        .bind(&resume.raw_text)
        .bind(resume.ats_score)
        .bind(&resume.strengths)
        .bind(&resume.weaknesses)
        .bind(&resume.keywords)
        .bind(&resume.skills)
        .bind(&resume.tech_skills)
        .bind(&resume.soft_skills)
        .bind(&resume.projects)
        .bind(&resume.work_experience)
        .bind(&resume.leadership)
        .bind(&resume.education)
        .bind(&resume.impact_metrics)
        .bind(&resume.domain)
        .bind(&resume.bullet_points)
        .bind(&resume.rewritten)
        .bind(&resume.comparison_note)
        .bind(resume.created_at)
        .bind(resume.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_resume(&self, id: Uuid) -> StoreResult<Option<ResumeRecord>> {
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn apply_resume_rewrite(
        &self,
        id: Uuid,
        update: &ResumeRewriteUpdate,
    ) -> StoreResult<Option<ResumeRecord>> {
        sqlx::query_as(
            r#"
            UPDATE resumes
            SET rewritten     = COALESCE($2, rewritten),
                bullet_points = COALESCE($3, bullet_points),
                keywords      = COALESCE($4, keywords),
                skills        = COALESCE($5, skills),
                updated_at    = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.rewritten)
        .bind(&update.bullet_points)
        .bind(&update.keywords)
        .bind(&update.skills)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_job_description(&self, jd: &JobDescriptionRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO job_descriptions
                (id, title, company, raw_text, required_skills, preferred_skills,
                 role_focus, seniority_level, hidden_signals, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(jd.id)
        .bind(&jd.title)
        .bind(&jd.company)
        .bind(&jd.raw_text)
        .bind(&jd.required_skills)
        .bind(&jd.preferred_skills)
        .bind(&jd.role_focus)
        .bind(&jd.seniority_level)
        .bind(&jd.hidden_signals)
        .bind(jd.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_job_description(&self, id: Uuid) -> StoreResult<Option<JobDescriptionRecord>> {
        sqlx::query_as("SELECT * FROM job_descriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_match(
        &self,
        resume_id: Uuid,
        job_description_id: Uuid,
    ) -> StoreResult<Option<MatchRecord>> {
        sqlx::query_as("SELECT * FROM matches WHERE resume_id = $1 AND job_description_id = $2")
            .bind(resume_id)
            .bind(job_description_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_match(&self, record: &MatchRecord) -> StoreResult<MatchRecord> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO matches (id, resume_id, job_description_id, score, analysis, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (resume_id, job_description_id) DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(record.resume_id)
        .bind(record.job_description_id)
        .bind(record.score)
        .bind(&record.analysis)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            debug!(
                "Match for resume {} / job {} already stored, keeping the first one",
                record.resume_id, record.job_description_id
            );
        }

        self.find_match(record.resume_id, record.job_description_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn insert_session(&self, session: &InterviewSession) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO interview_sessions
                (id, resume_id, job_description_id, company, role, interview_type,
                 difficulty, status, start_time, end_time, exchanges,
                 overall_score, feedback_summary, report)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(session.id)
        .bind(session.resume_id)
        .bind(session.job_description_id)
        .bind(&session.company)
        .bind(&session.role)
        .bind(&session.interview_type)
        .bind(session.difficulty.as_str())
        .bind(session.status.as_str())
        .bind(session.start_time)
        .bind(session.end_time)
        .bind(Json(&session.exchanges))
        .bind(session.overall_score)
        .bind(&session.feedback_summary)
        .bind(session.report.as_ref().map(Json))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_session(&self, id: Uuid) -> StoreResult<Option<InterviewSession>> {
        let row: Option<SessionRow> =
            sqlx::query_as("SELECT * FROM interview_sessions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(InterviewSession::try_from).transpose()
    }

    async fn append_exchange(
        &self,
        id: Uuid,
        expected_rounds: usize,
        exchange: &Exchange,
    ) -> StoreResult<bool> {
        // Compare-and-swap on the array length so concurrent submits cannot
        // both land on the same round.
        let result = sqlx::query(
            r#"
            UPDATE interview_sessions
            SET exchanges = exchanges || jsonb_build_array($1::jsonb)
            WHERE id = $2
              AND status = $3
              AND jsonb_array_length(exchanges) = $4
            "#,
        )
        .bind(Json(exchange))
        .bind(id)
        .bind(SessionStatus::InProgress.as_str())
        .bind(expected_rounds as i32)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn complete_session(
        &self,
        id: Uuid,
        completion: &SessionCompletion,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE interview_sessions
            SET status = $1,
                overall_score = $2,
                feedback_summary = $3,
                report = $4,
                end_time = $5
            WHERE id = $6 AND status = $7
            "#,
        )
        .bind(SessionStatus::Completed.as_str())
        .bind(completion.overall_score)
        .bind(&completion.feedback_summary)
        .bind(Json(&completion.report))
        .bind(completion.end_time)
        .bind(id)
        .bind(SessionStatus::InProgress.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn upsert_user(&self, user: &UserUpsert) -> StoreResult<(UserRecord, bool)> {
        let existing: Option<UserRecord> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(&user.email)
            .fetch_optional(&self.pool)
            .await?;

        let saved: UserRecord = sqlx::query_as(
            r#"
            INSERT INTO users (id, email, name, image)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET name  = COALESCE(EXCLUDED.name, users.name),
                image = COALESCE(EXCLUDED.image, users.image)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.image)
        .fetch_one(&self.pool)
        .await?;

        Ok((saved, existing.is_none()))
    }

    async fn first_user(&self) -> StoreResult<Option<UserRecord>> {
        sqlx::query_as("SELECT * FROM users ORDER BY created_at ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_user(&self, user: &UserUpsert) -> StoreResult<UserRecord> {
        sqlx::query_as(
            "INSERT INTO users (id, email, name, image) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.image)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_or_create_profile(&self, user_id: Uuid) -> StoreResult<InterviewProfile> {
        sqlx::query(
            r#"
            INSERT INTO interview_profiles (id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        sqlx::query_as("SELECT * FROM interview_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        target_role: Option<&str>,
        target_company: Option<&str>,
    ) -> StoreResult<InterviewProfile> {
        sqlx::query_as(
            r#"
            INSERT INTO interview_profiles (id, user_id, target_role, target_company)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET target_role    = COALESCE(EXCLUDED.target_role, interview_profiles.target_role),
                target_company = COALESCE(EXCLUDED.target_company, interview_profiles.target_company),
                updated_at     = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(target_role)
        .bind(target_company)
        .fetch_one(&self.pool)
        .await
    }
}
