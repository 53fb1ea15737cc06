//! Shared HTTP client and response utilities.

use std::sync::OnceLock;

use crate::error::SynthError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Map a non-2xx response to a service error, surfacing the body's
/// `message` field where available.
pub fn status_to_error(status: u16, body: &str) -> SynthError {
    let message = extract_message(body).unwrap_or_else(|| body.to_string());
    SynthError::service(status, message)
}

/// Extract the `message` field from a JSON error body.
pub fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(ToString::to_string)
        })
}

/// Normalize a base URL for path joining.
pub fn trim_trailing_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}
