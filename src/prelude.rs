//! Convenience re-exports for common use.

pub use crate::actions::{
    ActionKind, ActionSuccess, MusicRequest, MusicStyle, ReconciliationWarning,
};
pub use crate::config::SynthConfig;
pub use crate::error::{Result, SynthError};
pub use crate::identity::{IdentityProvider, StaticIdentity, UserId};
pub use crate::ledger::CreditLedgerClient;
pub use crate::orchestrator::ActionOrchestrator;
pub use crate::playback::{AudioExport, PlaybackController, PlaybackStatus};
pub use crate::services::{LyricsService, MusicService};
