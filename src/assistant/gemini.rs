//! Gemini API client
//!
//! Thin blocking wrapper around the `generateContent` endpoint. Calls are
//! made from worker threads, never from the UI loop.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const TIMEOUT_SECS: u64 = 60;

/// One part of a request message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Binary payload, already base64-encoded
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: &'a [Part],
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// JSON body for a single-turn request
pub fn request_body(parts: &[Part]) -> serde_json::Value {
    let request = GenerateRequest {
        contents: [RequestContent { parts }],
    };
    serde_json::to_value(&request).unwrap_or(serde_json::Value::Null)
}

/// Text of the first candidate, all parts concatenated
pub fn parse_response(body: &str) -> ExpenseResult<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ExpenseError::Network(
            "The model returned an empty response".into(),
        ));
    }
    Ok(text)
}

/// Error message from an error response body, if it has one
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|e| e.error.message)
}

/// The key travels in a header so it never shows up in request URLs
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Blocking client bound to one key and model
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> ExpenseResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| ExpenseError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Point the client at another host (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// URL of the `generateContent` call, without the key
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send `parts` as one user turn and return the reply text
    pub fn generate(&self, parts: &[Part]) -> ExpenseResult<String> {
        if self.api_key.trim().is_empty() {
            return Err(ExpenseError::Config(super::MISSING_KEY_MSG.into()));
        }

        log::info!("Sending generateContent request to model {}", self.model);
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request_body(parts))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            let detail = error_message(&body).unwrap_or_else(|| status.to_string());
            log::warn!("Model request failed with {}: {}", status, detail);
            return Err(ExpenseError::Network(format!(
                "Request failed ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        parse_response(&body)
    }

    /// Send a plain text prompt
    pub fn ask(&self, prompt: &str) -> ExpenseResult<String> {
        self.generate(&[Part::text(prompt)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_body() {
        let body = request_body(&[Part::text("hello")]);
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn test_inline_audio_request_body() {
        let body = request_body(&[Part::text("transcribe"), Part::inline("audio/wav", "QUJD")]);
        assert_eq!(
            body,
            json!({"contents": [{"parts": [
                {"text": "transcribe"},
                {"inline_data": {"mime_type": "audio/wav", "data": "QUJD"}}
            ]}]})
        );
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"You spent "},{"text":"$10."}],"role":"model"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "You spent $10.");
    }

    #[test]
    fn test_parse_response_empty_is_error() {
        assert!(parse_response(r#"{"candidates":[]}"#).is_err());
        assert!(parse_response(r#"{}"#).is_err());
        assert!(parse_response("not json").is_err());
    }

    #[test]
    fn test_connection_error_does_not_leak_key() {
        let client = GeminiClient::new("SECRETKEY123", "gemini-pro")
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let err = client.ask("hi").unwrap_err().to_string();
        assert!(err.starts_with("Network error"), "{}", err);
        assert!(!err.contains("SECRETKEY123"), "{}", err);
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("API key not valid."));
        assert_eq!(error_message("<html>"), None);
    }

    #[test]
    fn test_endpoint_uses_model_and_base() {
        let client = GeminiClient::new("k", "gemini-pro")
            .unwrap()
            .with_base_url("http://localhost:9999/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_missing_key_fails_before_network() {
        let client = GeminiClient::new("  ", "gemini-pro").unwrap();
        let err = client.ask("hi").unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}
