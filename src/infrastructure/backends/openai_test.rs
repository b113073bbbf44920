use serde_json::json;
use test_utils::error_envelope;
use test_utils::responses_envelope;

use super::OpenAI;
use crate::domain::models::Backend;
use crate::domain::models::HintPrompt;
use crate::domain::models::ReflectionPrompt;
use crate::domain::models::ReflectionVerdict;
use crate::domain::models::SessionConfig;
use crate::domain::models::FALLBACK_HINT_OFFLINE;
use crate::domain::models::FALLBACK_HINT_UNEXPECTED;

impl OpenAI {
    fn with_url(url: String) -> OpenAI {
        return OpenAI {
            url,
            token: "abc".to_string(),
            timeout: "200".to_string(),
        };
    }
}

fn hint_prompt() -> HintPrompt {
    let config = SessionConfig {
        topic: "City life".to_string(),
        vocabulary: "infrastructure, density".to_string(),
        constraint: "Write one paragraph.".to_string(),
    };

    return HintPrompt::new(&config, "Cities are important.");
}

fn reflection_prompt() -> ReflectionPrompt {
    return ReflectionPrompt {
        draft: "Hello. Goodbye.".to_string(),
        interaction_count: 2,
    };
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(200).create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_skips_health_checks_for_the_official_api() {
    let backend = OpenAI {
        url: "https://api.openai.com".to_string(),
        token: "abc".to_string(),
        timeout: "200".to_string(),
    };

    let res = backend.health_check().await;
    assert!(res.is_ok());
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(500).create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let backend = OpenAI {
        url: "http://localhost:1".to_string(),
        token: "".to_string(),
        timeout: "200".to_string(),
    };

    let res = backend.health_check().await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_gets_hints_from_responses_envelopes() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .match_header("Authorization", "Bearer abc")
        .with_status(200)
        .with_body(responses_envelope("Try naming the city in your opening."))
        .create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_hint(hint_prompt()).await;

    assert_eq!(res, "Try naming the city in your opening.");
    mock.assert();
}

#[tokio::test]
async fn it_gets_hints_from_choices_envelopes() {
    let body = json!({
        "choices": [{"message": {"role": "assistant", "content": "X"}}]
    })
    .to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_hint(hint_prompt()).await;

    assert_eq!(res, "X");
    mock.assert();
}

#[tokio::test]
async fn it_falls_back_when_the_hint_request_fails() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(500)
        .create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_hint(hint_prompt()).await;

    assert_eq!(res, FALLBACK_HINT_OFFLINE);
    mock.assert();
}

#[tokio::test]
async fn it_falls_back_on_error_bodies() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(200)
        .with_body(error_envelope("The model is overloaded"))
        .create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_hint(hint_prompt()).await;

    assert_eq!(res, FALLBACK_HINT_UNEXPECTED);
    mock.assert();
}

#[tokio::test]
async fn it_falls_back_when_the_hint_request_times_out() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let backend = OpenAI {
        url,
        token: "abc".to_string(),
        timeout: "100".to_string(),
    };

    let res = backend.get_hint(hint_prompt()).await;
    assert_eq!(res, FALLBACK_HINT_OFFLINE);
}

#[tokio::test]
async fn it_gets_reflections() {
    let fenced =
        "```json\n{\"sentence_count\":2,\"strength\":\"clarity\",\"improvement\":\"length\"}\n```";
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .match_body(mockito::Matcher::PartialJson(json!({
            "model": "gpt-5-nano",
            "store": false
        })))
        .with_status(200)
        .with_body(responses_envelope(fenced))
        .create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_reflection(reflection_prompt()).await;

    assert_eq!(
        res,
        ReflectionVerdict {
            sentence_count: 2,
            strength: "clarity".to_string(),
            improvement: "length".to_string(),
        }
    );
    mock.assert();
}

#[tokio::test]
async fn it_falls_back_on_unparsable_reflections() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(200)
        .with_body(responses_envelope("I could not produce JSON, sorry."))
        .create();

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_reflection(reflection_prompt()).await;

    assert_eq!(res, ReflectionVerdict::fallback());
    mock.assert();
}

#[tokio::test]
async fn it_falls_back_when_the_reflection_request_times_out() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let backend = OpenAI {
        url,
        token: "abc".to_string(),
        timeout: "100".to_string(),
    };

    let res = backend.get_reflection(reflection_prompt()).await;
    assert_eq!(res, ReflectionVerdict::fallback());
}
