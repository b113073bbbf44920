use serde_json::json;

/// Gemini generateContent response envelope wrapping the given text.
pub fn candidates_envelope(text: &str) -> String {
    return json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string();
}

/// Responses API envelope with a reasoning item ahead of the message item,
/// as observed from live calls.
pub fn responses_envelope(text: &str) -> String {
    return json!({
        "output": [
            {"type": "reasoning", "summary": []},
            {"type": "message", "content": [{"type": "output_text", "text": text}]}
        ]
    })
    .to_string();
}

/// Error body returned by both API families alongside a 200.
pub fn error_envelope(message: &str) -> String {
    return json!({
        "error": {"code": 500, "message": message, "status": "INTERNAL"}
    })
    .to_string();
}
