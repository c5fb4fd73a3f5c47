use super::errors::ConnectorError;
use crate::configuration::GeminiSettings;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

/// Abstraction over the generative model backend so tests can stand in a
/// scripted implementation.
#[async_trait]
pub trait InsightModel: Send + Sync {
    /// Send a single prompt and return the model's raw text answer.
    /// `grounded` enables the Google Search tool.
    async fn generate(&self, prompt: &str, grounded: bool) -> Result<String, ConnectorError>;
}

pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    http_client: reqwest::Client,
    retry_attempts: usize,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, ConnectorError> {
        let timeout = Duration::from_secs(settings.timeout_secs.max(1));
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            http_client,
            retry_attempts: settings.retry_attempts.max(1),
        })
    }

    fn request_body(prompt: &str, grounded: bool) -> Value {
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        if grounded {
            body["tools"] = json!([{ "google_search": {} }]);
        }
        body
    }

    /// Pull the answer text out of a `generateContent` response: the
    /// concatenation of `candidates[0].content.parts[*].text`.
    fn extract_text(payload: &Value) -> Option<String> {
        let parts = payload
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl InsightModel for GeminiClient {
    async fn generate(&self, prompt: &str, grounded: bool) -> Result<String, ConnectorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = Self::request_body(prompt, grounded);

        let mut last_error =
            ConnectorError::ServiceUnavailable("No attempts were made".to_string());

        for attempt in 1..=self.retry_attempts {
            let response = self
                .http_client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            return Err(ConnectorError::Unauthorized(format!(
                                "Gemini rejected the API key: {}",
                                status
                            )));
                        }
                        StatusCode::TOO_MANY_REQUESTS => {
                            return Err(ConnectorError::RateLimited(
                                "Gemini quota exceeded".to_string(),
                            ));
                        }
                        s if s.is_server_error() => {
                            tracing::warn!(
                                attempt,
                                status = %s,
                                "Gemini returned a server error, retrying"
                            );
                            last_error = ConnectorError::ServiceUnavailable(format!(
                                "Gemini returned {}",
                                s
                            ));
                        }
                        s if !s.is_success() => {
                            return Err(ConnectorError::Http(format!("Gemini returned {}", s)));
                        }
                        _ => {
                            let payload: Value = resp.json().await.map_err(|err| {
                                ConnectorError::InvalidResponse(format!(
                                    "Gemini response is not JSON: {}",
                                    err
                                ))
                            })?;

                            return Self::extract_text(&payload).ok_or_else(|| {
                                ConnectorError::InvalidResponse(
                                    "Gemini response contained no candidate text".to_string(),
                                )
                            });
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(attempt, "Gemini request failed: {}", err);
                    last_error = if err.is_timeout() {
                        ConnectorError::ServiceUnavailable(format!("Gemini timed out: {}", err))
                    } else {
                        ConnectorError::Http(format!("Gemini request failed: {}", err))
                    };
                }
            }

            if attempt < self.retry_attempts {
                let backoff = Duration::from_millis(100 * (1_u64 << (attempt - 1)));
                tokio::time::sleep(backoff).await;
            }
        }

        Err(last_error)
    }
}
