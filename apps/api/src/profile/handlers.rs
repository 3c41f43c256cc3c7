//! Account sync and the single-user profile page.
//!
//! There is no authentication: the profile endpoints act on the oldest user,
//! creating a demo account when the table is empty.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{InterviewProfile, UserRecord};
use crate::state::AppState;
use crate::store::UserUpsert;

const DEMO_EMAIL: &str = "demo@interviewexpert.ai";
const DEMO_NAME: &str = "Demo Candidate";
const DEMO_IMAGE: &str = "https://github.com/shadcn.png";

#[derive(Debug, Deserialize)]
pub struct SyncUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncedUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncUserResponse {
    /// "created" | "updated"
    pub status: &'static str,
    pub user: SyncedUser,
}

/// POST /api/users/sync
pub async fn handle_sync_user(
    State(state): State<AppState>,
    Json(req): Json<SyncUserRequest>,
) -> Result<Json<SyncUserResponse>, AppError> {
    let email = req
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

    let (user, created) = state
        .store
        .upsert_user(&UserUpsert {
            email,
            name: req.name,
            image: req.image,
        })
        .await?;
    let status = if created { "created" } else { "updated" };
    info!("User {} {status}", user.id);

    Ok(Json(SyncUserResponse {
        status,
        user: SyncedUser {
            id: user.id,
            email: user.email,
            name: user.name,
            image: user.image,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserRecord,
    pub profile: InterviewProfile,
}

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = match state.store.first_user().await? {
        Some(user) => user,
        None => {
            let demo = state
                .store
                .create_user(&UserUpsert {
                    email: DEMO_EMAIL.to_string(),
                    name: Some(DEMO_NAME.to_string()),
                    image: Some(DEMO_IMAGE.to_string()),
                })
                .await?;
            info!("No users yet, created demo user {}", demo.id);
            demo
        }
    };
    let profile = state.store.get_or_create_profile(user.id).await?;
    Ok(Json(ProfileResponse { user, profile }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub target_role: Option<String>,
    pub target_company: Option<String>,
}

/// POST /api/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<InterviewProfile>, AppError> {
    let user = state
        .store
        .first_user()
        .await?
        .ok_or_else(|| AppError::NotFound("No user found".to_string()))?;

    let profile = state
        .store
        .update_profile(
            user.id,
            req.target_role.as_deref(),
            req.target_company.as_deref(),
        )
        .await?;
    Ok(Json(profile))
}
