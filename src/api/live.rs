// src/api/live.rs
// HTTP transport against the real backend

use super::types::{
    ChatMessage, ChatReply, ChatRequest, ClassificationResult, HealthStatus, ImageUpload,
    MetricsReport, SummaryRequest, SummaryResponse,
};
use super::{ApiMode, Backend, endpoints};
use crate::config::ClientConfig;
use crate::error::{ApiError, DEFAULT_ERROR_STATUS, GENERIC_ERROR_MESSAGE, Result};
use crate::http::create_client;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Backend reached over HTTP
pub struct LiveBackend {
    http: reqwest::Client,
    config: ClientConfig,
}

impl LiveBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: create_client(config.timeout),
            config: config.clone(),
        }
    }

    /// Reuse an existing reqwest client (its own timeout applies)
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Send a request and decode a JSON body.
    /// Every failure on the way out passes through `normalize_failure`.
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        debug!(request_id = %request_id, endpoint = endpoint, "Sending request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let message = describe_transport_error(&e, self.config.timeout);
                let err = normalize_failure(e.status().map(|s| s.as_u16()), None, Some(&message));
                warn!(
                    request_id = %request_id,
                    endpoint = endpoint,
                    status = err.status(),
                    error = %err.message(),
                    "Request failed before a response arrived"
                );
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let fallback = format!("Request failed with status code {}", status.as_u16());
            let err = normalize_failure(Some(status.as_u16()), Some(&body), Some(&fallback));
            warn!(
                request_id = %request_id,
                endpoint = endpoint,
                status = status.as_u16(),
                error = %err.message(),
                "Backend returned an error response"
            );
            return Err(err);
        }

        let decoded = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<T>(&bytes)
                .map_err(|e| format!("Malformed response payload: {}", e)),
            Err(e) => Err(describe_transport_error(&e, self.config.timeout)),
        };

        match decoded {
            Ok(value) => {
                info!(
                    request_id = %request_id,
                    endpoint = endpoint,
                    status = status.as_u16(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Request complete"
                );
                Ok(value)
            }
            Err(message) => {
                let err = normalize_failure(None, None, Some(&message));
                warn!(
                    request_id = %request_id,
                    endpoint = endpoint,
                    error = %err.message(),
                    "Could not read response body"
                );
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Backend for LiveBackend {
    async fn classify_image(&self, image: &ImageUpload) -> Result<ClassificationResult> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ApiError::validation(format!("Invalid MIME type: {}", e)))?;
        let form = Form::new().part("image", part);

        let request = self.http.post(self.url(endpoints::PREDICT)).multipart(form);
        self.execute(endpoints::PREDICT, request).await
    }

    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        let builder = self.http.post(self.url(endpoints::SUMMARY)).json(request);
        self.execute(endpoints::SUMMARY, builder).await
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        let builder = self
            .http
            .post(self.url(endpoints::CHAT))
            .json(&ChatRequest { messages });
        self.execute(endpoints::CHAT, builder).await
    }

    async fn get_metrics(&self) -> Result<MetricsReport> {
        let builder = self.http.get(self.url(endpoints::METRICS));
        self.execute(endpoints::METRICS, builder).await
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        let builder = self.http.get(self.url(endpoints::HEALTH));
        self.execute(endpoints::HEALTH, builder).await
    }

    fn mode(&self) -> ApiMode {
        ApiMode::Live
    }
}

fn describe_transport_error(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        format!("Request timed out after {}s", timeout.as_secs())
    } else if err.is_connect() {
        format!("Could not connect to the backend: {}", err)
    } else {
        err.to_string()
    }
}

/// Collapse any failure into an `ApiError::Network`.
///
/// Message priority: JSON `error` field, JSON `message` field, the
/// transport's own message, then a generic fallback. Status defaults to
/// 500 when no response status is known.
pub fn normalize_failure(
    status: Option<u16>,
    body: Option<&str>,
    transport_message: Option<&str>,
) -> ApiError {
    let payload = body.and_then(|b| serde_json::from_str::<serde_json::Value>(b).ok());
    let field = |name: &str| {
        payload
            .as_ref()
            .and_then(|p| p.get(name))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let message = field("error")
        .or_else(|| field("message"))
        .or_else(|| {
            transport_message
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

    ApiError::network(message, status.unwrap_or(DEFAULT_ERROR_STATUS))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // normalize_failure
    // ========================================================================

    #[test]
    fn test_error_field_wins() {
        let err = normalize_failure(
            Some(422),
            Some(r#"{"error": "Face not detected", "message": "Unprocessable"}"#),
            Some("Request failed with status code 422"),
        );
        assert_eq!(err.message(), "Face not detected");
        assert_eq!(err.status(), 422);
    }

    #[test]
    fn test_message_field_second() {
        let err = normalize_failure(Some(503), Some(r#"{"message": "Model loading"}"#), Some("x"));
        assert_eq!(err.message(), "Model loading");
        assert_eq!(err.status(), 503);
    }

    #[test]
    fn test_non_string_fields_skipped() {
        let err = normalize_failure(
            Some(400),
            Some(r#"{"error": {"code": 7}, "message": ""}"#),
            Some("Request failed with status code 400"),
        );
        assert_eq!(err.message(), "Request failed with status code 400");
    }

    #[test]
    fn test_non_json_body_uses_transport_message() {
        let err = normalize_failure(Some(502), Some("<html>Bad Gateway</html>"), Some("bad gateway"));
        assert_eq!(err.message(), "bad gateway");
        assert_eq!(err.status(), 502);
    }

    #[test]
    fn test_no_response_defaults_to_500() {
        let err = normalize_failure(None, None, Some("connection refused"));
        assert_eq!(err.status(), 500);
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn test_generic_fallback() {
        let err = normalize_failure(None, None, None);
        assert_eq!(err.status(), DEFAULT_ERROR_STATUS);
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert!(!err.is_validation());
    }

    // ========================================================================
    // Transport
    // ========================================================================

    #[tokio::test]
    async fn test_connection_refused_is_normalized() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:1")
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        let backend = LiveBackend::new(&config);

        let err = backend.health_check().await.unwrap_err();
        assert_eq!(err.status(), 500);
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_urls_follow_config() {
        let config = ClientConfig::default()
            .with_base_url("http://backend:9000/")
            .unwrap();
        let backend = LiveBackend::new(&config);
        assert_eq!(backend.url(endpoints::SUMMARY), "http://backend:9000/api/gen/summary");
    }
}
