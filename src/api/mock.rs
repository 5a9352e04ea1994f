// src/api/mock.rs
// Simulated backend for development and tests without a live server

use super::types::{
    ChatMessage, ChatReply, ChatRole, ClassificationResult, Confidence, HealthStatus,
    ImageUpload, MetricsReport, Prediction, SummaryRequest, SummaryResponse,
};
use super::{ApiMode, Backend};
use crate::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

const DEEPFAKE_REPLY: &str = "AI-generated faces often carry subtle artifacts: \
inconsistent lighting between the eyes, blurred or warped hair boundaries, \
asymmetric earrings or glasses, and unnaturally smooth skin texture. The \
model learns to pick up these high-frequency inconsistencies even when they \
are invisible at a glance.";

const AUTHENTIC_REPLY: &str = "Real photographs keep natural sensor noise, \
consistent shadows and fine skin detail such as pores and stray hairs. When \
the model predicts Real it has found these cues consistent across the whole \
face rather than only in isolated regions.";

const METRICS_REPLY: &str = "The classifier reaches about 92% validation \
accuracy after 10 epochs. On the held-out set precision is roughly 93% and \
recall 92%, so missed fakes and false alarms are close to balanced. Open the \
metrics view for the full curves and confusion matrix.";

const HELP_REPLY: &str = "I can explain how the detector tells real faces \
from AI-generated ones, what a prediction's confidence means, or how the \
model performed during training. Try asking about fake artifacts, real \
photos, or accuracy.";

const MOCK_SUMMARY: &str = "The detector is a convolutional classifier trained \
on real and AI-generated face images. It reports a Real/Fake verdict with a \
confidence score and reaches about 92% accuracy on validation data.";

/// In-process stand-in for the backend with artificial latency
pub struct MockBackend {
    latency_ms: RangeInclusive<u64>,
    rng: Mutex<StdRng>,
}

impl MockBackend {
    pub fn new(latency_ms: RangeInclusive<u64>) -> Self {
        Self {
            latency_ms,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic classification results for a given seed
    pub fn with_seed(latency_ms: RangeInclusive<u64>, seed: u64) -> Self {
        Self {
            latency_ms,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    async fn simulate_latency(&self) {
        let (low, high) = (*self.latency_ms.start(), *self.latency_ms.end());
        let ms = if high <= low {
            low
        } else {
            self.with_rng(|rng| rng.random_range(low..=high))
        };
        if ms > 0 {
            debug!(latency_ms = ms, "Simulating backend latency");
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn classify_image(&self, image: &ImageUpload) -> Result<ClassificationResult> {
        self.simulate_latency().await;

        let (is_fake, fraction) =
            self.with_rng(|rng| (rng.random_bool(0.5), rng.random_range(0.70..=0.99)));
        let prediction = if is_fake { Prediction::Fake } else { Prediction::Real };
        let details = match prediction {
            Prediction::Fake => "Detected texture and lighting inconsistencies typical of generated faces",
            Prediction::Real => "Facial features and sensor noise are consistent with a real photograph",
        };

        debug!(file = %image.file_name, prediction = %prediction, "Mock classification");
        Ok(ClassificationResult {
            prediction,
            confidence: Confidence::from_raw(fraction),
            details: Some(details.to_string()),
        })
    }

    async fn summarize(&self, _request: &SummaryRequest) -> Result<SummaryResponse> {
        self.simulate_latency().await;
        Ok(SummaryResponse {
            summary: MOCK_SUMMARY.to_string(),
        })
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        self.simulate_latency().await;
        let latest = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(ChatReply {
            reply: canned_reply(latest).to_string(),
        })
    }

    async fn get_metrics(&self) -> Result<MetricsReport> {
        self.simulate_latency().await;
        Ok(sample_metrics())
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        self.simulate_latency().await;
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }

    fn mode(&self) -> ApiMode {
        ApiMode::Mock
    }
}

/// Pick a canned answer from substrings of the user's latest message
fn canned_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    if lower.contains("fake") || lower.contains("ai") {
        DEEPFAKE_REPLY
    } else if lower.contains("real") {
        AUTHENTIC_REPLY
    } else if lower.contains("accuracy") || lower.contains("performance") {
        METRICS_REPLY
    } else {
        HELP_REPLY
    }
}

/// Fixed 10-epoch training run
pub(crate) fn sample_metrics() -> MetricsReport {
    MetricsReport {
        epochs: (1..=10).collect(),
        train_accuracy: vec![0.72, 0.80, 0.84, 0.87, 0.89, 0.905, 0.915, 0.925, 0.932, 0.938],
        val_accuracy: vec![0.70, 0.77, 0.82, 0.85, 0.87, 0.885, 0.897, 0.906, 0.915, 0.923],
        train_loss: vec![0.58, 0.45, 0.37, 0.31, 0.27, 0.24, 0.21, 0.19, 0.17, 0.16],
        val_loss: vec![0.61, 0.49, 0.41, 0.36, 0.32, 0.29, 0.27, 0.25, 0.24, 0.23],
        confusion_matrix: [[4250, 350], [420, 4980]],
    }
}
