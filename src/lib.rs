// src/lib.rs
// facelens - client core for the Real/AI-generated face classifier demo

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod http;
pub mod metrics;

pub use api::{ApiClient, ApiMode, Backend};
pub use config::ClientConfig;
pub use conversation::ChatSession;
pub use error::{ApiError, Result, StandardError};
