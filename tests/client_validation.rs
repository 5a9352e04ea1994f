// tests/client_validation.rs
// ApiClient rejects bad input before the backend is called

use async_trait::async_trait;
use facelens::api::validate::parse_messages;
use facelens::api::{
    ApiClient, ApiMode, Backend, ChatMessage, ChatReply, ClassificationResult, Confidence,
    HealthStatus, ImageUpload, MetricsReport, Prediction, SummaryRequest, SummaryResponse,
};
use facelens::error::Result;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records how many times any operation reached it
#[derive(Default)]
struct CountingBackend {
    calls: AtomicUsize,
}

impl CountingBackend {
    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for CountingBackend {
    async fn classify_image(&self, _image: &ImageUpload) -> Result<ClassificationResult> {
        self.hit();
        Ok(ClassificationResult {
            prediction: Prediction::Fake,
            confidence: Confidence::from_raw(0.5),
            details: None,
        })
    }

    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        self.hit();
        Ok(SummaryResponse {
            summary: request.text.clone(),
        })
    }

    async fn chat(&self, _messages: &[ChatMessage]) -> Result<ChatReply> {
        self.hit();
        Ok(ChatReply {
            reply: "ok".into(),
        })
    }

    async fn get_metrics(&self) -> Result<MetricsReport> {
        self.hit();
        Ok(MetricsReport {
            epochs: vec![1],
            train_accuracy: vec![0.9],
            val_accuracy: vec![0.88],
            train_loss: vec![0.2],
            val_loss: vec![0.25],
            confusion_matrix: [[1, 0], [0, 1]],
        })
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        self.hit();
        Ok(HealthStatus {
            status: "ok".into(),
        })
    }

    fn mode(&self) -> ApiMode {
        ApiMode::Mock
    }
}

fn setup() -> (Arc<CountingBackend>, ApiClient) {
    let backend = Arc::new(CountingBackend::default());
    let client = ApiClient::new(backend.clone());
    (backend, client)
}

#[tokio::test]
async fn test_oversized_image_rejected_before_dispatch() {
    let (backend, client) = setup();
    let image = ImageUpload::new("big.jpg", "image/jpeg", vec![0u8; 15 * 1000 * 1000]);

    let err = client.classify_image(&image).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_text_file_rejected_before_dispatch() {
    let (backend, client) = setup();
    let image = ImageUpload::new("notes.txt", "text/plain", b"not an image".to_vec());

    let err = client.classify_image(&image).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.status(), 400);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_valid_image_dispatched_once() {
    let (backend, client) = setup();
    let image = ImageUpload::new("face.webp", "image/webp", vec![1u8; 64]);

    client.classify_image(&image).await.unwrap();
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_chat_rejects_empty_and_contentless() {
    let (backend, client) = setup();

    assert!(client.chat(&[]).await.unwrap_err().is_validation());

    let messages = parse_messages(json!([{"role": "user"}])).unwrap();
    assert!(client.chat(&messages).await.unwrap_err().is_validation());

    assert!(parse_messages(json!([{"content": "no role"}])).unwrap_err().is_validation());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_summarize_rejects_blank_text() {
    let (backend, client) = setup();

    assert!(client.summarize("", None).await.unwrap_err().is_validation());
    assert!(client.summarize(" \n ", Some("ctx")).await.unwrap_err().is_validation());
    assert_eq!(backend.calls(), 0);

    let summary = client.summarize("keep me", None).await.unwrap();
    assert_eq!(summary.summary, "keep me");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_metrics_and_health_pass_through() {
    let (backend, client) = setup();

    assert_eq!(client.get_metrics().await.unwrap().epochs, vec![1]);
    assert_eq!(client.health_check().await.unwrap().status, "ok");
    assert_eq!(backend.calls(), 2);
    assert_eq!(client.mode(), ApiMode::Mock);
}
