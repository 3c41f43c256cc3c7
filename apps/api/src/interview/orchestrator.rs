//! Interview session lifecycle: init → (next → submit) × 5 → results.
//!
//! Every step re-reads the session from the store; nothing is cached in-process.
//! The round number is the length of `exchanges`. `next` only reports that the
//! rounds are used up; the COMPLETED transition is recorded by `results`.
//!
//! Concurrency guards:
//! - `submit` appends with a compare-and-swap on the round count it read, so two
//!   racing submits cannot both land; the loser gets a 409 and nothing is written.
//! - `results` completes only an IN_PROGRESS session, and a COMPLETED session
//!   returns its stored report without another model call.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::difficulty::suggest_difficulty;
use crate::interview::evaluation::{
    analyze_star, evaluate_answer, requires_star, AnswerEvaluation, DEFAULT_QUESTION_TYPE,
};
use crate::interview::questions::{
    generate_question, CandidateContext, GeneratedQuestion, QuestionRequest, RoleContext,
};
use crate::interview::report::generate_report;
use crate::llm_client::LlmClient;
use crate::models::interview::{
    Difficulty, Exchange, InterviewReport, InterviewSession, SessionCompletion, SessionStatus,
    StarAnalysis, DEFAULT_INTERVIEW_TYPE, MAX_ROUNDS,
};
use crate::store::SessionStore;

pub const COMPLETE_MESSAGE: &str = "Interview Concluded";

#[derive(Debug, Clone)]
pub struct NewSession {
    pub resume_id: Uuid,
    pub job_description_id: Uuid,
    pub interview_type: Option<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestion {
    #[serde(flatten)]
    pub question: GeneratedQuestion,
    pub current_round: usize,
    pub total_rounds: usize,
    pub suggested_difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewComplete {
    pub is_complete: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NextStep {
    Question(NextQuestion),
    Complete(InterviewComplete),
}

#[derive(Debug, Clone)]
pub struct AnswerSubmission {
    pub question: String,
    pub answer: String,
    pub question_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    #[serde(flatten)]
    pub evaluation: AnswerEvaluation,
    pub star_analysis: Option<StarAnalysis>,
}

async fn load_session(store: &dyn SessionStore, id: Uuid) -> Result<InterviewSession, AppError> {
    store
        .get_session(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

pub async fn init_session(
    store: &dyn SessionStore,
    req: NewSession,
) -> Result<InterviewSession, AppError> {
    let resume = store.get_resume(req.resume_id).await?;
    let jd = store.get_job_description(req.job_description_id).await?;
    let jd = match (resume, jd) {
        (Some(_), Some(jd)) => jd,
        _ => {
            return Err(AppError::NotFound(
                "Resume or Job Description not found".to_string(),
            ))
        }
    };

    let interview_type = req
        .interview_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_INTERVIEW_TYPE.to_string());

    let session = InterviewSession {
        id: Uuid::new_v4(),
        resume_id: req.resume_id,
        job_description_id: req.job_description_id,
        company: jd.company,
        role: jd.title,
        interview_type,
        difficulty: req.difficulty.unwrap_or_default(),
        status: SessionStatus::InProgress,
        start_time: Utc::now(),
        end_time: None,
        exchanges: Vec::new(),
        overall_score: None,
        feedback_summary: None,
        report: None,
    };
    store.insert_session(&session).await?;
    info!(
        "Interview session {} created ({} / {}, {})",
        session.id, session.company, session.role, session.interview_type
    );
    Ok(session)
}

/// Generates the next question. Read-only: the question is not stored until answered.
pub async fn next_question(
    store: &dyn SessionStore,
    llm: &LlmClient,
    session_id: Uuid,
) -> Result<NextStep, AppError> {
    let session = load_session(store, session_id).await?;
    let resume = store.get_resume(session.resume_id).await?;
    let jd = store.get_job_description(session.job_description_id).await?;
    let (resume, jd) = match (resume, jd) {
        (Some(r), Some(j)) => (r, j),
        _ => return Err(AppError::NotFound("Context data missing".to_string())),
    };

    if session.is_finished() {
        return Ok(NextStep::Complete(InterviewComplete {
            is_complete: true,
            message: COMPLETE_MESSAGE.to_string(),
        }));
    }

    let rounds = session.round_count();
    let difficulty = suggest_difficulty(&session.scores());
    let question = generate_question(
        llm,
        &QuestionRequest {
            history: &session.exchanges,
            candidate: CandidateContext::from_resume(&resume),
            role: RoleContext::from_job(&jd),
            focus: &session.interview_type,
            difficulty,
        },
    )
    .await?;

    Ok(NextStep::Question(NextQuestion {
        question,
        current_round: rounds + 1,
        total_rounds: MAX_ROUNDS,
        suggested_difficulty: difficulty,
    }))
}

/// Evaluates one answer and appends exactly one exchange, or fails without writing.
pub async fn submit_answer(
    store: &dyn SessionStore,
    llm: &LlmClient,
    session_id: Uuid,
    submission: AnswerSubmission,
) -> Result<SubmitOutcome, AppError> {
    if submission.question.trim().is_empty() || submission.answer.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }

    let session = load_session(store, session_id).await?;
    if session.status == SessionStatus::Completed {
        return Err(AppError::Conflict(format!(
            "Session {session_id} is already completed"
        )));
    }
    let rounds = session.round_count();
    if rounds >= MAX_ROUNDS {
        return Err(AppError::Conflict(format!(
            "Session {session_id} already has {MAX_ROUNDS} answers"
        )));
    }

    let question_type = submission
        .question_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_QUESTION_TYPE.to_string());

    let evaluation =
        evaluate_answer(llm, &submission.question, &submission.answer, &question_type).await?;

    let star_analysis = if requires_star(&question_type) {
        match analyze_star(llm, &submission.question, &submission.answer).await {
            Ok(star) => Some(star),
            Err(e) => {
                warn!("STAR analysis failed for session {session_id}, continuing without it: {e}");
                None
            }
        }
    } else {
        None
    };

    let exchange = Exchange {
        question: submission.question,
        answer: submission.answer,
        question_type,
        feedback: evaluation.feedback.clone(),
        score: evaluation.score,
        improvements: evaluation.improvements.clone(),
        red_flags: evaluation.red_flags.clone(),
        star_analysis: star_analysis.clone(),
        timestamp: Utc::now(),
    };

    if !store.append_exchange(session_id, rounds, &exchange).await? {
        return Err(AppError::Conflict(format!(
            "Session {session_id} changed while the answer was being evaluated; please resubmit"
        )));
    }
    info!(
        "Session {session_id}: round {} recorded (score {})",
        rounds + 1,
        exchange.score
    );

    Ok(SubmitOutcome {
        evaluation,
        star_analysis,
    })
}

/// Closes the session with a final report. Idempotent once COMPLETED.
pub async fn finish_interview(
    store: &dyn SessionStore,
    llm: &LlmClient,
    session_id: Uuid,
) -> Result<InterviewReport, AppError> {
    let session = load_session(store, session_id).await?;
    if session.status == SessionStatus::Completed {
        return Ok(stored_report(session));
    }

    let report = generate_report(llm, &session.exchanges, &session.interview_type).await?;
    let completion = SessionCompletion {
        overall_score: report.overall_score,
        feedback_summary: report.summary.clone(),
        report: report.clone(),
        end_time: Utc::now(),
    };

    if store.complete_session(session_id, &completion).await? {
        info!(
            "Session {session_id} completed after {} round(s), overall score {}",
            session.round_count(),
            report.overall_score
        );
        return Ok(report);
    }

    // Another request completed it first; its report is the one on record.
    warn!("Session {session_id} was completed concurrently, returning the stored report");
    let current = load_session(store, session_id).await?;
    Ok(stored_report(current))
}

/// Sessions completed before reports were stored only have score and summary.
fn stored_report(session: InterviewSession) -> InterviewReport {
    session.report.unwrap_or_else(|| InterviewReport {
        overall_score: session.overall_score.unwrap_or_default(),
        summary: session.feedback_summary.unwrap_or_default(),
        ..Default::default()
    })
}
