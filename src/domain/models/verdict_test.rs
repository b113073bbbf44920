use anyhow::Result;

use super::strip_code_fences;
use super::ReflectionVerdict;

#[test]
fn it_parses_bare_json() -> Result<()> {
    let res = ReflectionVerdict::parse(
        "{\"sentence_count\": 3, \"strength\": \"analyze\", \"improvement\": \"Vary sentence openings.\"}",
    )?;

    assert_eq!(res.sentence_count, 3);
    assert_eq!(res.strength, "analyze");
    assert_eq!(res.improvement, "Vary sentence openings.");
    return Ok(());
}

#[test]
fn it_parses_fenced_json() -> Result<()> {
    let res = ReflectionVerdict::parse(
        "```json\n{\"sentence_count\":2,\"strength\":\"clarity\",\"improvement\":\"length\"}\n```",
    )?;

    assert_eq!(
        res,
        ReflectionVerdict {
            sentence_count: 2,
            strength: "clarity".to_string(),
            improvement: "length".to_string(),
        }
    );
    return Ok(());
}

#[test]
fn it_parses_fenced_json_without_language() -> Result<()> {
    let res = ReflectionVerdict::parse(
        "```\n{\"sentence_count\":1,\"strength\":\"focus\",\"improvement\":\"detail\"}\n```",
    )?;

    assert_eq!(res.sentence_count, 1);
    return Ok(());
}

#[test]
fn it_fails_on_unparsable_text() {
    let res = ReflectionVerdict::parse("The student wrote two sentences.");
    assert!(res.is_err());
}

#[test]
fn it_fails_on_missing_fields() {
    let res = ReflectionVerdict::parse("{\"sentence_count\": 2}");
    assert!(res.is_err());
}

#[test]
fn it_strips_code_fences() {
    assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
    assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    assert_eq!(strip_code_fences("{}"), "{}");
}

#[test]
fn it_builds_the_fallback_verdict() {
    let res = ReflectionVerdict::fallback();
    assert_eq!(res.sentence_count, 0);
    assert_eq!(res.strength, "Good effort!");
    assert_eq!(res.improvement, "Keep practicing.");
}
