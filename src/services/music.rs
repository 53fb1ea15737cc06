//! Music synthesis service (`/suno/generate-music`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::debug;

use super::http::{extract_message, shared_client, trim_trailing_slash};
use crate::actions::MusicRequest;
use crate::error::{Result, SynthError};
use crate::identity::UserId;
use crate::util::timeout::with_timeout;

// Synthesis routinely takes minutes.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Trait for music synthesis collaborators.
#[async_trait]
pub trait MusicService: Send + Sync {
    /// Synthesize a track, returning the raw audio payload.
    async fn generate(&self, user: &UserId, request: &MusicRequest) -> Result<Vec<u8>>;
}

#[derive(Debug, Serialize)]
struct MusicRequestBody<'a> {
    uid: &'a str,
    title: &'a str,
    lyrics: &'a str,
    style: String,
}

/// Music synthesis over the SunoSynth backend.
#[derive(Debug, Clone)]
pub struct HttpMusicService {
    base_url: String,
    timeout: Duration,
}

impl HttpMusicService {
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

    async fn generate_once(&self, user: &UserId, request: &MusicRequest) -> Result<Vec<u8>> {
        let url = format!(
            "{}/suno/generate-music",
            trim_trailing_slash(&self.base_url)
        );
        let body = MusicRequestBody {
            uid: user.as_str(),
            title: &request.title,
            lyrics: &request.lyrics,
            style: request.wire_style(),
        };

        debug!(title = %request.title, style = %body.style, "requesting music synthesis");
        let response = shared_client().post(url).json(&body).send().await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let text = response.text().await.unwrap_or_default();
            return Err(SynthError::service(
                status,
                extract_message(&text).unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        // A 2xx JSON body is the generator reporting failure in-band.
        if content_type.starts_with("application/json") {
            let text = response.text().await.unwrap_or_default();
            return Err(SynthError::service(
                status,
                extract_message(&text)
                    .unwrap_or_else(|| "Expected audio payload, got JSON response".to_string()),
            ));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SynthError::service(
                status,
                "Generator returned an empty audio payload",
            ));
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl MusicService for HttpMusicService {
    async fn generate(&self, user: &UserId, request: &MusicRequest) -> Result<Vec<u8>> {
        with_timeout(self.timeout, self.generate_once(user, request)).await
    }
}
