//! Metered actions: kinds, fixed costs, request payloads, and outcomes.

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, SynthError};

/// Maximum track title length, in characters.
pub const TITLE_MAX_CHARS: usize = 30;

/// Maximum lyrics length, in characters.
pub const LYRICS_MAX_CHARS: usize = 2000;

/// The kinds of metered actions a user can spend credits on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "title_case")]
pub enum ActionKind {
    LyricsGeneration,
    MusicGeneration,
    Download,
}

impl ActionKind {
    /// Fixed credit cost, known before admission and debited only after the
    /// unit of work succeeds.
    pub const fn cost(self) -> u32 {
        match self {
            ActionKind::LyricsGeneration => 5,
            ActionKind::MusicGeneration => 10,
            ActionKind::Download => 2,
        }
    }
}

/// Catalog of music styles offered by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum MusicStyle {
    #[strum(serialize = "Hip-Hop")]
    HipHop,
    Rock,
    Pop,
    Jazz,
    Classical,
    Custom,
}

/// A music synthesis request.
///
/// Validated locally before admission; no network cost is incurred on a
/// validation failure.
#[derive(Debug, Clone, Builder)]
pub struct MusicRequest {
    #[builder(into)]
    pub title: String,
    #[builder(into)]
    pub lyrics: String,
    #[builder(default = MusicStyle::HipHop)]
    pub style: MusicStyle,
    /// Free-form style description, required when `style` is `Custom`.
    #[builder(into)]
    pub custom_style: Option<String>,
}

impl MusicRequest {
    /// Check field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SynthError::Validation("Title cannot be empty".into()));
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(SynthError::Validation(format!(
                "Title exceeds the {TITLE_MAX_CHARS} character limit"
            )));
        }
        if self.lyrics.trim().is_empty() {
            return Err(SynthError::Validation("Lyrics cannot be empty".into()));
        }
        if self.lyrics.chars().count() > LYRICS_MAX_CHARS {
            return Err(SynthError::Validation(format!(
                "Lyrics exceed the {LYRICS_MAX_CHARS} character limit"
            )));
        }
        if self.style == MusicStyle::Custom
            && !self
                .custom_style
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
        {
            return Err(SynthError::Validation(
                "A custom style requires a style description".into(),
            ));
        }
        Ok(())
    }

    /// Style string sent to the generator: the catalog name, or the
    /// free-form description when `Custom` is selected.
    pub fn wire_style(&self) -> String {
        match (self.style, self.custom_style.as_deref()) {
            (MusicStyle::Custom, Some(custom)) => custom.to_string(),
            (style, _) => style.to_string(),
        }
    }
}

/// Result of a metered action whose unit of work succeeded.
#[derive(Debug)]
pub struct ActionSuccess<T> {
    pub payload: T,
    /// Present when the post-work debit failed: the artifact was already
    /// delivered, and the cached balance may lag until the next fetch.
    pub warning: Option<ReconciliationWarning>,
}

impl<T> ActionSuccess<T> {
    pub fn clean(payload: T) -> Self {
        Self {
            payload,
            warning: None,
        }
    }
}

/// Unit of work succeeded but the ledger debit did not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationWarning {
    pub kind: ActionKind,
    pub cost: u32,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}
