// tests/mock_metrics.rs
// Simulated backend through the client into the metrics deriver

use facelens::api::{ApiClient, ChatMessage, ImageUpload, MockBackend};
use facelens::config::{ApiMode, ClientConfig};
use facelens::metrics::{
    derive_confusion_stats, derive_epoch_series, derive_summary, format_percent,
};
use std::sync::Arc;

fn mock_client() -> ApiClient {
    let config = ClientConfig::default()
        .with_mode(ApiMode::Mock)
        .with_mock_latency(0..=0);
    ApiClient::from_config(&config)
}

#[tokio::test]
async fn test_metrics_pipeline() {
    let client = mock_client();
    let report = client.get_metrics().await.unwrap();

    let series = derive_epoch_series(&report).unwrap();
    assert_eq!(series.len(), 10);
    for (i, record) in series.iter().enumerate() {
        assert_eq!(record.epoch, i as u32 + 1);
        assert!(record.train_accuracy > 0.0 && record.val_loss > 0.0);
    }

    let summary = derive_summary(&report).unwrap();
    assert_eq!(summary.total_epochs, 10);
    assert_eq!(summary.final_val_accuracy, report.val_accuracy[9]);

    let stats = derive_confusion_stats(report.confusion_matrix).unwrap();
    assert_eq!(format_percent(Some(stats.accuracy)), "92.3%");
    assert_eq!(format_percent(stats.precision), "93.4%");
    assert_eq!(format_percent(stats.recall), "92.2%");
    assert_eq!(format_percent(stats.f1), "92.8%");
}

#[tokio::test]
async fn test_mock_chat_keywords_through_client() {
    let client = mock_client();

    let reply = client
        .chat(&[ChatMessage::user("How accurate is it? What's the accuracy?")])
        .await
        .unwrap();
    assert!(reply.reply.contains("92%"));

    let reply = client
        .chat(&[ChatMessage::user("Why was my photo flagged as fake?")])
        .await
        .unwrap();
    assert!(reply.reply.contains("artifacts"));
}

#[tokio::test]
async fn test_mock_classify_validates_first() {
    let client = ApiClient::new(Arc::new(MockBackend::with_seed(0..=0, 3)));

    let err = client
        .classify_image(&ImageUpload::new("a.bmp", "image/bmp", vec![1]))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let ok = client
        .classify_image(&ImageUpload::new("a.gif", "image/gif", vec![1]))
        .await
        .unwrap();
    assert!(ok.confidence.percent() <= 100.0);
}
