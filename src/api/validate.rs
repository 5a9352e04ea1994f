// src/api/validate.rs
// Client-side preconditions checked before any request is dispatched

use super::types::{ALLOWED_IMAGE_TYPES, ChatMessage, ImageUpload, MAX_IMAGE_BYTES};
use crate::error::{ApiError, Result};

pub fn validate_image(image: &ImageUpload) -> Result<()> {
    // Drop parameters such as "; charset=binary" before comparing
    let essence = image
        .mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    if !ALLOWED_IMAGE_TYPES.contains(&essence.as_str()) {
        return Err(ApiError::validation(format!(
            "Unsupported file type '{}'. Please upload a JPEG, PNG, WebP or GIF image",
            image.mime_type
        )));
    }

    if image.bytes.is_empty() {
        return Err(ApiError::validation("Image file is empty"));
    }

    if image.size() > MAX_IMAGE_BYTES {
        return Err(ApiError::validation(format!(
            "Image is {:.1} MB; the maximum size is 10 MB",
            image.size() as f64 / (1024.0 * 1024.0)
        )));
    }

    Ok(())
}

pub fn validate_summary_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ApiError::validation("Text to summarize must not be empty"));
    }
    Ok(())
}

pub fn validate_messages(messages: &[ChatMessage]) -> Result<()> {
    if messages.is_empty() {
        return Err(ApiError::validation("Conversation must contain at least one message"));
    }

    if let Some(idx) = messages.iter().position(|m| m.content.trim().is_empty()) {
        return Err(ApiError::validation(format!(
            "Message {} is missing content",
            idx + 1
        )));
    }

    Ok(())
}

/// Parse an untyped message list, reporting shape problems as validation errors
pub fn parse_messages(value: serde_json::Value) -> Result<Vec<ChatMessage>> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::validation(format!("Malformed message list: {}", e)))
}
