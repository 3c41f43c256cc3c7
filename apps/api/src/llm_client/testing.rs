//! Scripted transport for tests: replays queued provider responses in order and
//! records every request it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::retry::RetryPolicy;
use super::{LlmClient, LlmError, ModelRequest, ModelTransport, RawResponse};

/// Wraps model text in a provider success envelope.
pub fn gemini_envelope(text: &str) -> String {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }],
        "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 5 }
    })
    .to_string()
}

#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, LlmError>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> LlmClient {
        LlmClient::new(self.clone(), RetryPolicy::default())
    }

    pub fn push_raw(&self, status: u16, body: String) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse { status, body }));
    }

    /// A 200 whose model text is `text`.
    pub fn push_text(&self, text: &str) {
        self.push_raw(200, gemini_envelope(text));
    }

    pub fn push_json(&self, value: Value) {
        self.push_text(&value.to_string());
    }

    pub fn push_status(&self, status: u16, body: &str) {
        self.push_raw(status, body.to_string());
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(LlmError::Transport(message.to_string())));
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Joined text of the n-th recorded request.
    pub fn prompt(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].text()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    async fn send(&self, request: &ModelRequest) -> Result<RawResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(RawResponse {
                    status: 500,
                    body: "no scripted response left".to_string(),
                })
            })
    }
}
