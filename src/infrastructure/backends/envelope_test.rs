use serde_json::json;

use super::extract_text;

#[test]
fn it_extracts_candidates_content_parts() {
    let body = json!({
        "candidates": [{"content": {"parts": [{"text": "X"}]}}]
    });
    assert_eq!(extract_text(&body), Some("X".to_string()));
}

#[test]
fn it_extracts_content_items() {
    let body = json!({
        "content": [{"type": "output_text", "text": "From the content array."}]
    });
    assert_eq!(
        extract_text(&body),
        Some("From the content array.".to_string())
    );
}

#[test]
fn it_extracts_output_message_content() {
    let body = json!({
        "output": [
            {"type": "reasoning", "summary": []},
            {"type": "message", "content": [
                {"type": "refusal", "refusal": "no"},
                {"type": "output_text", "text": "From the message item."}
            ]}
        ]
    });
    assert_eq!(
        extract_text(&body),
        Some("From the message item.".to_string())
    );
}

#[test]
fn it_extracts_direct_output_item_text() {
    let body = json!({
        "output": [{"type": "something-new", "text": "Direct text."}]
    });
    assert_eq!(extract_text(&body), Some("Direct text.".to_string()));
}

#[test]
fn it_extracts_choices_message_content() {
    let body = json!({
        "choices": [{"message": {"role": "assistant", "content": "From choices."}}]
    });
    assert_eq!(extract_text(&body), Some("From choices.".to_string()));
}

#[test]
fn it_extracts_top_level_text() {
    let body = json!({"text": "Top level."});
    assert_eq!(extract_text(&body), Some("Top level.".to_string()));
}

#[test]
fn it_stringifies_the_last_output_element_as_a_last_resort() {
    let body = json!({
        "output": [{"type": "reasoning"}, {"type": "unknown", "payload": 7}]
    });
    let res = extract_text(&body).unwrap();
    assert!(res.contains("\"payload\":7"));
}

#[test]
fn it_rejects_error_bodies() {
    let body = json!({
        "error": {"code": 429, "message": "Resource has been exhausted"},
        "text": "should never be read"
    });
    assert_eq!(extract_text(&body), None);
}

#[test]
fn it_rejects_bodies_with_no_known_shape() {
    let body = json!({"usage": {"total_tokens": 12}});
    assert_eq!(extract_text(&body), None);
}

#[test]
fn it_skips_empty_text_fields() {
    let body = json!({
        "candidates": [{"content": {"parts": [{"text": ""}]}}],
        "text": "further down the list"
    });
    assert_eq!(extract_text(&body), Some("further down the list".to_string()));
}
