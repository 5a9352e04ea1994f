// src/http.rs
// Shared HTTP client for all backend operations

use std::time::Duration;

/// Request timeout applied to every backend operation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the shared HTTP client with the given request timeout.
///
/// Created once when the API client is composed; reqwest pools
/// connections internally so concurrent calls share it.
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .pool_max_idle_per_host(4)
        .user_agent(concat!("facelens/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
