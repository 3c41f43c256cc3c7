//! Turning model text into typed values.
//!
//! The model is asked for JSON but is not guaranteed to produce it cleanly, so
//! parsing is two-tier: strict parse of the fence-stripped text, then a salvage
//! pass over the outermost `{ ... }` block.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::LlmError;

pub(crate) fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let cleaned = strip_json_fences(text);

    match serde_json::from_str::<T>(cleaned) {
        Ok(value) => Ok(value),
        // Well-formed JSON that does not fit T will not be fixed by salvaging.
        Err(e) if e.is_data() => Err(LlmError::Shape(e)),
        Err(e) => {
            debug!("Strict JSON parse failed ({e}), attempting salvage");
            let block = salvage_json_object(cleaned).ok_or(LlmError::NonJson)?;
            serde_json::from_str::<T>(block).map_err(|e| {
                if e.is_data() {
                    LlmError::Shape(e)
                } else {
                    LlmError::NonJson
                }
            })
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    // optional language tag (json, JSON, ...)
    let inner = inner
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim_start();
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// First `{` through last `}`, if both exist in that order.
pub(crate) fn salvage_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
