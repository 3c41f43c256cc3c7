use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::archive::archive_resume;
use crate::errors::AppError;
use crate::extraction::{extract_text, UploadedDocument};
use crate::models::resume::ResumeRecord;
use crate::resume::analysis::analyze_resume;
use crate::resume::rewrite::{rewrite_resume, RewriteSource, TailoringContext};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// First `file` field of the form; other fields are ignored.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadedDocument>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some(UploadedDocument {
            filename,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

/// POST /api/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let doc = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let extraction_input = doc.clone();
    let raw_text = tokio::task::spawn_blocking(move || extract_text(&extraction_input))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("text extraction task failed: {e}")))?;

    let analysis = analyze_resume(&state.llm, &doc, &raw_text).await?;

    let id = Uuid::new_v4();
    let storage_key = archive_resume(
        state.archive.as_deref(),
        id,
        &doc.filename,
        doc.mime_type(),
        doc.bytes.clone(),
    )
    .await;

    let record = analysis.into_record(id, &doc, raw_text, storage_key);
    state.store.insert_resume(&record).await?;
    info!(
        "Stored resume {id} ('{}', {} bytes, ats={:?})",
        record.filename, record.size, record.ats_score
    );

    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub resume_id: Option<Uuid>,
    pub text: Option<String>,
    pub job_description_id: Option<Uuid>,
}

/// POST /api/resume/rewrite
///
/// Supplied `text` takes precedence over the stored resume. When `resumeId`
/// resolves, the fields the rewrite produced are written back to it.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(req): Json<RewriteRequest>,
) -> Result<Json<Value>, AppError> {
    let stored = match req.resume_id {
        Some(id) => Some(
            state
                .store
                .get_resume(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?,
        ),
        None => None,
    };

    let text = req.text.as_deref().filter(|t| !t.trim().is_empty());
    let source = match (text, &stored) {
        (Some(text), _) => RewriteSource::Text(text),
        (None, Some(record)) => RewriteSource::Stored(record),
        (None, None) => {
            return Err(AppError::Validation(
                "No text available for rewrite".to_string(),
            ))
        }
    };

    let tailoring = match req.job_description_id {
        Some(id) => state
            .store
            .get_job_description(id)
            .await?
            .map(|jd| TailoringContext::from_job(&jd)),
        None => None,
    };

    let outcome = rewrite_resume(&state.llm, source, tailoring.as_ref()).await?;

    if let Some(record) = &stored {
        let update = outcome.to_update();
        if !update.is_empty() {
            state.store.apply_resume_rewrite(record.id, &update).await?;
            info!("Applied rewrite to resume {}", record.id);
        }
    }

    let mut body = serde_json::to_value(&outcome).map_err(anyhow::Error::from)?;
    body["targeted"] = Value::Bool(tailoring.is_some());
    Ok(Json(body))
}
