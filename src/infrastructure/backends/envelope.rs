#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;

use serde_json::Value;

type ShapeMatcher = fn(&Value) -> Option<String>;

/// Response shapes observed from hosted generation APIs, tried in order.
/// The remote envelope is not contractually stable, extraction has to keep
/// working across shape drift.
const SHAPE_MATCHERS: &[ShapeMatcher] = &[
    candidates_content_parts,
    content_items,
    output_message_content,
    output_item_text,
    choices_message_content,
    top_level_text,
];

/// Pulls the first plausible text field out of a response body. A body
/// carrying an `error` object never matches. When no shape matches but an
/// `output` array is present, its trailing element is surfaced as raw JSON
/// rather than failing.
pub fn extract_text(body: &Value) -> Option<String> {
    if body.get("error").is_some() {
        return None;
    }

    for matcher in SHAPE_MATCHERS {
        if let Some(text) = matcher(body) {
            return Some(text);
        }
    }

    if let Some(items) = body.get("output").and_then(Value::as_array) {
        if let Some(last) = items.last() {
            return Some(last.to_string());
        }
    }

    return None;
}

fn non_empty(value: &Value) -> Option<String> {
    let text = value.as_str()?;
    if text.is_empty() {
        return None;
    }

    return Some(text.to_string());
}

// candidates[0].content.parts[0].text, the generateContent shape.
fn candidates_content_parts(body: &Value) -> Option<String> {
    return non_empty(
        body.get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .get(0)?
            .get("text")?,
    );
}

// content: [{text}], seen from Responses API deployments.
fn content_items(body: &Value) -> Option<String> {
    let items = body.get("content")?.as_array()?;
    return items.iter().find_map(|item| {
        return item.get("text").and_then(non_empty);
    });
}

// output[] holding a "message" item with "output_text" content parts.
fn output_message_content(body: &Value) -> Option<String> {
    let items = body.get("output")?.as_array()?;
    let message = items.iter().find(|item| {
        return item.get("type").and_then(Value::as_str) == Some("message")
            && item.get("content").map_or(false, Value::is_array);
    })?;

    let parts = message.get("content")?.as_array()?;
    let part = parts.iter().find(|part| {
        return part.get("type").and_then(Value::as_str) == Some("output_text");
    })?;

    return non_empty(part.get("text")?);
}

// Any output[] item carrying a plain text field.
fn output_item_text(body: &Value) -> Option<String> {
    let items = body.get("output")?.as_array()?;
    return items.iter().find_map(|item| {
        return item.get("text").and_then(non_empty);
    });
}

// choices[0].message.content, the chat-completions shape.
fn choices_message_content(body: &Value) -> Option<String> {
    return non_empty(body.get("choices")?.get(0)?.get("message")?.get("content")?);
}

fn top_level_text(body: &Value) -> Option<String> {
    return non_empty(body.get("text")?);
}
