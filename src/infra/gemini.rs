//! HTTP adapter for the Gemini `generateContent` endpoint.

use std::time::Instant;

use async_trait::async_trait;
use blueocean_api_types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use metrics::{counter, histogram};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::{
    application::{
        generator::{GenerationError, StrategyGenerator},
        prompt::build_strategy_prompt,
    },
    config::ModelSettings,
    domain::{credential::ApiKey, preferences::Preferences},
};

use super::{
    error::InfraError,
    telemetry::{METRIC_GENERATION_LATENCY_MS, METRIC_GENERATION_REQUESTS},
};

const SOURCE: &str = "infra::gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    model: String,
    thinking_budget: Option<u32>,
}

impl GeminiClient {
    pub fn new(settings: &ModelSettings) -> Result<Self, InfraError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| InfraError::http_client(format!("failed to build client: {err}")))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            model: settings.name.clone(),
            thinking_budget: settings.thinking_budget,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Absolute URL of the `generateContent` call for the configured model.
    pub fn generate_url(&self) -> Result<Url, GenerationError> {
        self.endpoint
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|err| GenerationError::transport(format!("invalid model endpoint: {err}")))
    }

    /// Request body sent for `preferences`.
    pub fn request_for(&self, preferences: &Preferences) -> GenerateContentRequest {
        let request = GenerateContentRequest::from_prompt(build_strategy_prompt(preferences));
        match self.thinking_budget {
            Some(budget) => request.with_thinking_budget(budget),
            None => request,
        }
    }

    async fn call(
        &self,
        api_key: &ApiKey,
        request: &GenerateContentRequest,
    ) -> Result<Option<String>, GenerationError> {
        let url = self.generate_url()?;
        debug!(target_module = SOURCE, model = %self.model, %url, "sending generation request");

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|err| GenerationError::transport(describe_transport(&err)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| GenerationError::transport(describe_transport(&err)))?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body).map_err(|err| {
            GenerationError::decode(format!("failed to parse model response: {err}"))
        })?;

        Ok(parsed.text())
    }
}

#[async_trait]
impl StrategyGenerator for GeminiClient {
    async fn generate(
        &self,
        api_key: &ApiKey,
        preferences: &Preferences,
    ) -> Result<Option<String>, GenerationError> {
        let request = self.request_for(preferences);
        let started = Instant::now();
        let result = self.call(api_key, &request).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let outcome = match &result {
            Ok(_) => "success",
            Err(err) => err.kind(),
        };
        counter!(METRIC_GENERATION_REQUESTS, "outcome" => outcome).increment(1);
        histogram!(METRIC_GENERATION_LATENCY_MS).record(elapsed_ms);

        if let Err(err) = &result {
            warn!(
                target_module = SOURCE,
                model = %self.model,
                kind = err.kind(),
                error = %err,
                elapsed_ms,
                "generation request failed"
            );
        }

        result
    }
}

fn rejection(status: StatusCode, body: &[u8]) -> GenerationError {
    let message = serde_json::from_slice::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_default();
    GenerationError::model(Some(status.as_u16()), message)
}

fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request to the model timed out".to_string()
    } else if err.is_connect() {
        format!("unable to reach the model endpoint: {err}")
    } else {
        format!("request to the model failed: {err}")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::generator::GENERIC_GENERATION_FAILURE;

    fn settings(endpoint: &str) -> ModelSettings {
        ModelSettings {
            api_key: None,
            endpoint: Url::parse(endpoint).expect("endpoint url"),
            name: "gemini-3-pro-preview".to_string(),
            thinking_budget: Some(32_768),
            request_timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn generate_url_targets_model_resource() {
        let client = GeminiClient::new(&settings("https://generativelanguage.googleapis.com/"))
            .expect("client");
        assert_eq!(
            client.generate_url().expect("url").as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn generate_url_keeps_endpoint_path_prefix() {
        let client = GeminiClient::new(&settings("http://localhost:8080/proxy/")).expect("client");
        assert_eq!(
            client.generate_url().expect("url").as_str(),
            "http://localhost:8080/proxy/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn request_carries_prompt_and_thinking_budget() {
        let client = GeminiClient::new(&settings("http://localhost/")).expect("client");
        let preferences = Preferences {
            industry: Some("FinTech".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(client.request_for(&preferences)).expect("encode");

        let prompt = value["contents"][0]["parts"][0]["text"].as_str().expect("prompt text");
        assert!(prompt.contains("- Preferred Industry: FinTech"));
        assert_eq!(
            value["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            32_768
        );
    }

    #[test]
    fn request_without_budget_omits_generation_config() {
        let mut settings = settings("http://localhost/");
        settings.thinking_budget = None;
        let client = GeminiClient::new(&settings).expect("client");

        let value =
            serde_json::to_value(client.request_for(&Preferences::default())).expect("encode");
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn rejection_prefers_error_envelope_message() {
        let err = rejection(
            StatusCode::TOO_MANY_REQUESTS,
            br#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        );
        assert_eq!(err.to_string(), "Resource has been exhausted");
        assert!(matches!(err, GenerationError::Model { status: Some(429), .. }));
    }

    #[test]
    fn rejection_without_envelope_uses_generic_message() {
        let err = rejection(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(err.to_string(), GENERIC_GENERATION_FAILURE);
    }
}
