// Shared prompt fragments and prompt-building utilities.
// Each feature that calls the model defines its own prompts.rs alongside it.

/// Closing instruction appended to every prompt that expects a JSON document back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Respond with a single valid JSON object only. \
Do NOT use markdown code fences. \
Do NOT include any text before or after the JSON.";

/// Character budgets for long inputs embedded in prompts.
pub const RESUME_TEXT_BUDGET: usize = 8000;
pub const JD_TEXT_BUDGET: usize = 3000;
pub const JD_MATCH_TEXT_BUDGET: usize = 5000;

/// Truncates to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Serializes prompt context; falls back to `null` for values that cannot be encoded.
pub fn to_prompt_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Fills `{name}` placeholders in one left-to-right pass over `template`.
/// Substituted values are never scanned again, so user text that happens to
/// contain a placeholder is embedded verbatim. Unknown braces are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
