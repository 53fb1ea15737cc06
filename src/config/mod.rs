//! Configuration for the remote collaborators (env-driven, with overrides).

use crate::error::{Result, SynthError};

/// Env var naming the base URL of the ledger + music backend.
pub const API_URL_VAR: &str = "SUNOSYNTH_API_URL";

/// Env var naming the base URL of the lyrics backend.
pub const LYRICS_URL_VAR: &str = "SUNOSYNTH_VERCEL_API_URL";

/// Base URLs of the remote collaborators.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    api_base_url: String,
    lyrics_base_url: String,
}

impl SynthConfig {
    pub fn new(api_base_url: impl Into<String>, lyrics_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            lyrics_base_url: lyrics_base_url.into(),
        }
    }

    /// Load from environment variables (reads `.env` if present, ignores its absence).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = std::env::var(API_URL_VAR)
            .map_err(|_| SynthError::Configuration(format!("{API_URL_VAR} is not set")))?;
        let lyrics_base_url = std::env::var(LYRICS_URL_VAR)
            .map_err(|_| SynthError::Configuration(format!("{LYRICS_URL_VAR} is not set")))?;

        Ok(Self {
            api_base_url,
            lyrics_base_url,
        })
    }

    /// Base URL serving `/credits/*` and `/suno/generate-music`.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Base URL serving `/generate` (lyric drafting).
    pub fn lyrics_base_url(&self) -> &str {
        &self.lyrics_base_url
    }
}
