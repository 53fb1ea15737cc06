//! AI lyric drafting service (`/generate`).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{shared_client, status_to_error, trim_trailing_slash};
use crate::error::{Result, SynthError};
use crate::util::timeout::with_timeout;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for AI lyric drafting collaborators.
#[async_trait]
pub trait LyricsService: Send + Sync {
    /// Draft lyrics from a free-form prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct LyricsRequestBody<'a> {
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct LyricsResponseBody {
    response: Option<String>,
}

/// Lyric drafting over the SunoSynth prompt endpoint.
#[derive(Debug, Clone)]
pub struct HttpLyricsService {
    base_url: String,
    timeout: Duration,
}

impl HttpLyricsService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn generate_once(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/generate", trim_trailing_slash(&self.base_url));

        debug!("requesting lyric draft");
        let response = shared_client()
            .post(url)
            .json(&LyricsRequestBody { input: prompt })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(status_to_error(status, &body));
        }

        let parsed: LyricsResponseBody = serde_json::from_str(&body)?;
        match parsed.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(SynthError::service(status, "Lyrics response missing text")),
        }
    }
}

#[async_trait]
impl LyricsService for HttpLyricsService {
    async fn generate(&self, prompt: &str) -> Result<String> {
        with_timeout(self.timeout, self.generate_once(prompt)).await
    }
}
