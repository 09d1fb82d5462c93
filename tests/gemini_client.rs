use std::{sync::Arc, time::Duration};

use blueocean::{
    application::{
        generator::{GENERIC_GENERATION_FAILURE, GenerationError, StrategyGenerator},
        lifecycle::{EMPTY_RESULT_CONTENT, RequestController, StartOutcome},
    },
    config::ModelSettings,
    domain::{credential::ApiKey, preferences::Preferences, state::RequestState},
    infra::gemini::GeminiClient,
};
use httpmock::MockServer;
use url::Url;

const MODEL: &str = "gemini-test";
const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn settings(server: &MockServer) -> ModelSettings {
    ModelSettings {
        api_key: ApiKey::from_raw("test-key"),
        endpoint: Url::parse(&format!("{}/", server.base_url())).expect("mock url"),
        name: MODEL.to_string(),
        thinking_budget: Some(32_768),
        request_timeout: Some(Duration::from_secs(5)),
    }
}

fn controller(server: &MockServer) -> RequestController {
    let settings = settings(server);
    let client = GeminiClient::new(&settings).expect("client");
    RequestController::new(settings.api_key, Arc::new(client))
}

fn fintech() -> Preferences {
    Preferences {
        industry: Some("FinTech".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn successful_call_completes_with_non_thought_text() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path(GENERATE_PATH)
            .header("x-goog-api-key", "test-key")
            .json_body_includes(
                r#"{"generationConfig":{"thinkingConfig":{"thinkingBudget":32768}}}"#,
            );
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r##"{"candidates":[{"content":{"role":"model","parts":[
                    {"text":"weighing options","thought":true},
                    {"text":"# Ledgerly\n"},
                    {"text":"**Revenue Model**: subscriptions"}
                ]},"finishReason":"STOP"}],"modelVersion":"gemini-test"}"##,
            );
    });

    let controller = controller(&server);
    let outcome = controller.start(fintech()).await;

    let expected = RequestState::Complete {
        content: "# Ledgerly\n**Revenue Model**: subscriptions".to_string(),
    };
    assert_eq!(outcome, StartOutcome::Settled(expected.clone()));
    assert_eq!(controller.current(), expected);
    mock.assert();
}

#[tokio::test]
async fn model_rejection_surfaces_error_message() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST").path(GENERATE_PATH);
        then.status(429)
            .header("content-type", "application/json")
            .body(r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#);
    });

    let controller = controller(&server);
    controller.start(fintech()).await;

    assert_eq!(
        controller.current(),
        RequestState::Failed {
            message: "quota exceeded".to_string()
        }
    );
    mock.assert();
}

#[tokio::test]
async fn rejection_without_envelope_uses_generic_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path(GENERATE_PATH);
        then.status(503).body("upstream unavailable");
    });

    let controller = controller(&server);
    controller.start(Preferences::default()).await;

    assert_eq!(controller.current().message(), Some(GENERIC_GENERATION_FAILURE));
}

#[tokio::test]
async fn missing_candidates_complete_with_placeholder() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path(GENERATE_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"candidates":[]}"#);
    });

    let controller = controller(&server);
    controller.start(Preferences::default()).await;

    assert_eq!(controller.current().content(), Some(EMPTY_RESULT_CONTENT));
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path(GENERATE_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .body("not json");
    });

    let settings = settings(&server);
    let client = GeminiClient::new(&settings).expect("client");
    let api_key = ApiKey::from_raw("test-key").expect("key");

    let err = client
        .generate(&api_key, &Preferences::default())
        .await
        .expect_err("decode failure");
    assert!(matches!(err, GenerationError::Decode { .. }));
}

#[tokio::test]
async fn slow_model_times_out_as_transport_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path(GENERATE_PATH);
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(r#"{"candidates":[]}"#);
    });

    let mut settings = settings(&server);
    settings.request_timeout = Some(Duration::from_millis(200));
    let client = GeminiClient::new(&settings).expect("client");
    let api_key = ApiKey::from_raw("test-key").expect("key");

    let err = client
        .generate(&api_key, &Preferences::default())
        .await
        .expect_err("timeout");
    assert_eq!(err.kind(), "transport");
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn missing_credential_never_reaches_the_model() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST").path(GENERATE_PATH);
        then.status(200).body(r#"{"candidates":[]}"#);
    });

    let settings = settings(&server);
    let client = GeminiClient::new(&settings).expect("client");
    let controller = RequestController::new(None, Arc::new(client));

    let outcome = controller.start(fintech()).await;

    assert_eq!(outcome, StartOutcome::CredentialMissing);
    assert!(
        controller
            .current()
            .message()
            .is_some_and(|message| message.contains("API Key"))
    );
    mock.assert_hits(0);
}
