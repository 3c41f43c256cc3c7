pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{cover_letter, interview, job, profile, resume};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/db/health", get(health::db_health_handler))
        .route("/api/navigation", get(health::navigation_handler))
        .route("/api/highlights", get(health::highlights_handler))
        // Resume
        .route(
            "/api/resume/analyze",
            post(resume::handlers::handle_analyze).layer(upload_limit),
        )
        .route("/api/resume/rewrite", post(resume::handlers::handle_rewrite))
        // Job descriptions
        .route("/api/job/analyze", post(job::handlers::handle_analyze))
        .route("/api/job/match", post(job::handlers::handle_match))
        .route("/api/job-intel", post(job::handlers::handle_job_intel))
        // Interview loop
        .route("/api/interview/init", post(interview::handlers::handle_init))
        .route("/api/interview/next", post(interview::handlers::handle_next))
        .route("/api/interview/submit", post(interview::handlers::handle_submit))
        .route(
            "/api/interview/results",
            post(interview::handlers::handle_results),
        )
        .route(
            "/api/cover-letter/generate",
            post(cover_letter::handlers::handle_generate),
        )
        // Accounts
        .route("/api/users/sync", post(profile::handlers::handle_sync_user))
        .route(
            "/api/profile",
            get(profile::handlers::handle_get_profile)
                .post(profile::handlers::handle_update_profile),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedTransport;
    use crate::store::memory::MemoryStore;
    use crate::store::SessionStore;
    use crate::test_support::{seeded_store, test_state};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_upload(filename: &str, content_type: &str, content: &[u8]) -> Request<Body> {
        let boundary = "prepcoach-test-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::post("/api/resume/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_static_endpoints() {
        let transport = ScriptedTransport::new();
        let router = build_router(test_state(&transport, Arc::new(MemoryStore::new())));

        let (status, body) = send(router.clone(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "API running");

        let (_, body) = send(router.clone(), get_request("/health")).await;
        assert_eq!(body, json!({ "status": "ok" }));

        let (_, body) = send(router.clone(), get_request("/api/db/health")).await;
        assert_eq!(body, json!({ "status": "ok", "provider": "postgres" }));

        let (_, body) = send(router.clone(), get_request("/api/navigation")).await;
        assert_eq!(body["links"].as_array().unwrap().len(), 4);
        assert_eq!(body["links"][0]["href"], "/dashboard");

        let (_, body) = send(router, get_request("/api/highlights")).await;
        assert_eq!(body["atsScore"], 82);
    }

    #[tokio::test]
    async fn test_resume_upload_is_analyzed_and_stored() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({
            "atsScore": 77,
            "techSkills": ["Rust"],
            "softSkills": ["Mentoring"],
            "bulletPoints": ["Built things"]
        }));
        let store = Arc::new(MemoryStore::new());
        let router = build_router(test_state(&transport, store.clone()));

        let (status, body) = send(
            router,
            multipart_upload("cv.txt", "text/plain", b"Jane Doe, Rust engineer"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rawText"], "Jane Doe, Rust engineer");
        assert_eq!(body["atsScore"], 77.0);
        assert_eq!(body["storageKey"], Value::Null);
        let id = body["id"].as_str().unwrap().parse().unwrap();
        assert!(store.get_resume(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_bad_request() {
        let transport = ScriptedTransport::new();
        let router = build_router(test_state(&transport, Arc::new(MemoryStore::new())));

        let boundary = "b";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let request = Request::post("/api/resume/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file uploaded");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let transport = ScriptedTransport::new();
        let state = test_state(&transport, Arc::new(MemoryStore::new()));
        let too_big = vec![b'a'; state.config.max_upload_bytes + 1024];
        let router = build_router(state);

        let (status, _) = send(router, multipart_upload("cv.txt", "text/plain", &too_big)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_interview_round_trip_over_http() {
        let (store, resume, jd) = seeded_store().await;
        let transport = ScriptedTransport::new();
        let router = build_router(test_state(&transport, store.clone()));

        let (status, session) = send(
            router.clone(),
            post_json(
                "/api/interview/init",
                json!({ "resumeId": resume.id, "jobDescriptionId": jd.id, "difficulty": "hard" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["status"], "IN_PROGRESS");
        assert_eq!(session["difficulty"], "HARD");
        assert_eq!(session["type"], "SCREENING");
        let session_id = session["id"].clone();

        transport.push_json(json!({
            "question": "How did you scale the billing API?",
            "type": "Technical",
            "difficulty": "Medium",
            "hints": "Talk about partitioning",
            "isDeepDive": true
        }));
        let (status, next) = send(
            router.clone(),
            post_json("/api/interview/next", json!({ "sessionId": session_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(next["currentRound"], 1);
        assert_eq!(next["totalRounds"], 5);
        assert_eq!(next["suggestedDifficulty"], "MEDIUM");
        assert_eq!(next["type"], "Technical");

        transport.push_json(json!({
            "score": 88, "feedback": "Strong.", "improvements": "Better way to say this: x", "redFlags": []
        }));
        let (status, submitted) = send(
            router.clone(),
            post_json(
                "/api/interview/submit",
                json!({
                    "sessionId": session_id,
                    "question": "How did you scale the billing API?",
                    "answer": "Sharded by tenant.",
                    "type": "Technical"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(submitted["score"], 88.0);
        assert_eq!(submitted["starAnalysis"], Value::Null);

        transport.push_json(json!({
            "overallScore": 88, "summary": "Ready.", "strengths": [], "weaknesses": [],
            "readinessLevel": "High", "heatmap": []
        }));
        let (status, report) = send(
            router.clone(),
            post_json("/api/interview/results", json!({ "sessionId": session_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["readinessLevel"], "High");

        let (status, next) = send(
            router,
            post_json("/api/interview/next", json!({ "sessionId": session_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(next, json!({ "isComplete": true, "message": "Interview Concluded" }));
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_interview_input_errors() {
        let (store, resume, jd) = seeded_store().await;
        let transport = ScriptedTransport::new();
        let router = build_router(test_state(&transport, store));

        let (status, _) = send(
            router.clone(),
            post_json(
                "/api/interview/init",
                json!({ "resumeId": resume.id, "jobDescriptionId": jd.id, "difficulty": "brutal" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(router.clone(), post_json("/api/interview/next", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            router,
            post_json(
                "/api/interview/results",
                json!({ "sessionId": uuid::Uuid::new_v4() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cover_letter_requires_known_resume() {
        let (store, resume, _) = seeded_store().await;
        let transport = ScriptedTransport::new();
        let router = build_router(test_state(&transport, store));

        let (status, _) = send(
            router.clone(),
            post_json("/api/cover-letter/generate", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            router.clone(),
            post_json(
                "/api/cover-letter/generate",
                json!({ "resumeId": uuid::Uuid::new_v4() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        transport.push_json(json!({ "coverLetter": "Dear Hiring Team" }));
        let (status, body) = send(
            router,
            post_json(
                "/api/cover-letter/generate",
                json!({ "resumeId": resume.id, "jobDescriptionId": uuid::Uuid::new_v4() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["coverLetter"], "Dear Hiring Team");
        assert!(transport.prompt(0).contains("Hiring Team"));
    }

    #[tokio::test]
    async fn test_rewrite_with_unknown_resume_is_not_found() {
        let transport = ScriptedTransport::new();
        let router = build_router(test_state(&transport, Arc::new(MemoryStore::new())));

        let (status, _) = send(
            router,
            post_json(
                "/api/resume/rewrite",
                json!({ "resumeId": uuid::Uuid::new_v4(), "text": "some resume" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_job_analyze_requires_text() {
        let transport = ScriptedTransport::new();
        let router = build_router(test_state(&transport, Arc::new(MemoryStore::new())));

        let (status, body) = send(router, post_json("/api/job/analyze", json!({ "text": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
