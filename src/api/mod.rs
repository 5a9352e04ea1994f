// src/api/mod.rs
// API client: one boundary for all backend communication

mod live;
mod mock;
pub mod types;
pub mod validate;

pub use crate::config::ApiMode;
pub use live::{LiveBackend, normalize_failure};
pub use mock::MockBackend;
pub use types::{
    ChatMessage, ChatReply, ChatRole, ClassificationResult, Confidence, HealthStatus,
    ImageUpload, MetricsReport, Prediction, SummaryRequest, SummaryResponse,
};

use crate::config::ClientConfig;
use crate::error::{ApiError, DEFAULT_ERROR_STATUS, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Backend paths
pub mod endpoints {
    pub const PREDICT: &str = "/api/predict";
    pub const SUMMARY: &str = "/api/gen/summary";
    pub const CHAT: &str = "/api/chat";
    pub const METRICS: &str = "/api/metrics";
    pub const HEALTH: &str = "/api/health";
}

/// Capability implemented by the live HTTP transport and the simulated backend.
///
/// Inputs reaching a backend have already passed validation in `ApiClient`.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn classify_image(&self, image: &ImageUpload) -> Result<ClassificationResult>;

    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse>;

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply>;

    async fn get_metrics(&self) -> Result<MetricsReport>;

    async fn health_check(&self) -> Result<HealthStatus>;

    fn mode(&self) -> ApiMode;
}

/// Validating front for a `Backend`, cheap to clone and share across tasks
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn Backend>,
}

impl ApiClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Compose the client once from configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        let backend: Arc<dyn Backend> = match config.mode {
            ApiMode::Live => Arc::new(LiveBackend::new(config)),
            ApiMode::Mock => Arc::new(MockBackend::new(config.mock_latency_ms.clone())),
        };
        info!(mode = %config.mode, origin = %config.origin(), "API client ready");
        Self { backend }
    }

    pub fn mode(&self) -> ApiMode {
        self.backend.mode()
    }

    pub async fn classify_image(&self, image: &ImageUpload) -> Result<ClassificationResult> {
        validate::validate_image(image)?;
        self.backend.classify_image(image).await
    }

    pub async fn summarize(&self, text: &str, context: Option<&str>) -> Result<SummaryResponse> {
        validate::validate_summary_text(text)?;
        let request = SummaryRequest {
            text: text.to_string(),
            context: context.map(str::to_string),
        };
        self.backend.summarize(&request).await
    }

    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        validate::validate_messages(messages)?;
        self.backend.chat(messages).await
    }

    /// Fetch training metrics; a report with diverging curve lengths is
    /// treated as a malformed payload
    pub async fn get_metrics(&self) -> Result<MetricsReport> {
        let report = self.backend.get_metrics().await?;
        if let Err(e) = report.validate() {
            warn!(error = %e, "Backend returned inconsistent metrics");
            return Err(ApiError::network(
                format!("Malformed metrics payload: {}", e),
                DEFAULT_ERROR_STATUS,
            ));
        }
        Ok(report)
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.backend.health_check().await
    }
}
