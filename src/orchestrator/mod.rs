//! Credit-metered action orchestration.
//!
//! For each action: admission against the *cached* balance, the remote
//! unit of work, then debit settlement — strictly in that order. A per-kind
//! admission lock rejects re-entrant triggers of the same kind instead of
//! queueing them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::actions::{ActionKind, ActionSuccess, MusicRequest, ReconciliationWarning};
use crate::config::SynthConfig;
use crate::error::{Result, SynthError};
use crate::identity::{IdentityProvider, UserId};
use crate::ledger::CreditLedgerClient;
use crate::playback::{AudioExport, PlaybackController};
use crate::services::{HttpLyricsService, HttpMusicService, LyricsService, MusicService};

/// Per-kind in-flight flags. At most one invocation per kind at any time.
#[derive(Debug, Default)]
struct AdmissionFlags {
    lyrics: AtomicBool,
    music: AtomicBool,
    download: AtomicBool,
}

impl AdmissionFlags {
    fn flag(&self, kind: ActionKind) -> &AtomicBool {
        match kind {
            ActionKind::LyricsGeneration => &self.lyrics,
            ActionKind::MusicGeneration => &self.music,
            ActionKind::Download => &self.download,
        }
    }
}

/// Clears the per-kind flag on every exit path.
struct AdmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for AdmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Orchestrates metered actions against the ledger and the generators.
pub struct ActionOrchestrator {
    ledger: Arc<CreditLedgerClient>,
    lyrics: Arc<dyn LyricsService>,
    music: Arc<dyn MusicService>,
    identity: Arc<dyn IdentityProvider>,
    flags: AdmissionFlags,
}

impl ActionOrchestrator {
    pub fn new(
        ledger: Arc<CreditLedgerClient>,
        lyrics: Arc<dyn LyricsService>,
        music: Arc<dyn MusicService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            ledger,
            lyrics,
            music,
            identity,
            flags: AdmissionFlags::default(),
        }
    }

    /// Wire up the HTTP collaborators from config.
    pub fn from_config(config: &SynthConfig, identity: Arc<dyn IdentityProvider>) -> Self {
        Self::new(
            Arc::new(CreditLedgerClient::new(config.api_base_url())),
            Arc::new(HttpLyricsService::new(config.lyrics_base_url())),
            Arc::new(HttpMusicService::new(config.api_base_url())),
            identity,
        )
    }

    /// The ledger client backing admission checks.
    pub fn ledger(&self) -> &CreditLedgerClient {
        &self.ledger
    }

    /// Draft lyrics from a prompt. Costs 5 credits on success; the caller
    /// replaces the displayed lyrics with the returned text.
    pub async fn generate_lyrics(&self, prompt: &str) -> Result<ActionSuccess<String>> {
        let user = self.current_user()?;
        if prompt.trim().is_empty() {
            return Err(SynthError::Validation("Prompt cannot be empty".into()));
        }

        let kind = ActionKind::LyricsGeneration;
        let _guard = self.try_acquire(kind)?;
        self.admit(kind)?;

        let text = self.lyrics.generate(prompt).await?;
        let warning = self.settle(&user, kind).await;
        Ok(ActionSuccess {
            payload: text,
            warning,
        })
    }

    /// Synthesize a track. Costs 10 credits on success; the caller hands
    /// the returned audio to [`PlaybackController::replace`].
    pub async fn generate_music(&self, request: &MusicRequest) -> Result<ActionSuccess<Vec<u8>>> {
        let user = self.current_user()?;
        request.validate()?;

        let kind = ActionKind::MusicGeneration;
        let _guard = self.try_acquire(kind)?;
        self.admit(kind)?;

        let audio = self.music.generate(&user, request).await?;
        let warning = self.settle(&user, kind).await;
        Ok(ActionSuccess {
            payload: audio,
            warning,
        })
    }

    /// Export the currently loaded track. Costs 2 credits on success; the
    /// playback resource itself is neither consumed nor released.
    pub async fn download(
        &self,
        playback: &PlaybackController,
    ) -> Result<ActionSuccess<AudioExport>> {
        let user = self.current_user()?;

        let kind = ActionKind::Download;
        let _guard = self.try_acquire(kind)?;
        if playback.is_empty() {
            return Err(SynthError::State("No generated audio to download".into()));
        }
        self.admit(kind)?;

        let export = playback.export()?;
        let warning = self.settle(&user, kind).await;
        Ok(ActionSuccess {
            payload: export,
            warning,
        })
    }

    /// Re-sync the cached balance with the ledger. This is also the
    /// remediation for a [`ReconciliationWarning`].
    pub async fn refresh_balance(&self) -> Result<u32> {
        let user = self.current_user()?;
        self.ledger.fetch_balance(&user).await
    }

    fn current_user(&self) -> Result<UserId> {
        self.identity
            .current_user()
            .ok_or_else(|| SynthError::Authentication("User not signed in".into()))
    }

    fn try_acquire(&self, kind: ActionKind) -> Result<AdmissionGuard<'_>> {
        let flag = self.flags.flag(kind);
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            debug!(%kind, "rejected re-entrant trigger");
            return Err(SynthError::Busy { kind });
        }
        Ok(AdmissionGuard { flag })
    }

    /// Optimistic admission against the last cached balance. A stale cache
    /// may let a request through; the generator then reports the real
    /// insufficiency as a service failure.
    fn admit(&self, kind: ActionKind) -> Result<()> {
        let available = self.ledger.cached_balance();
        let required = kind.cost();
        if available < required {
            debug!(%kind, required, available, "admission rejected");
            return Err(SynthError::InsufficientCredits {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Debit after a successful unit of work. A failure here is downgraded
    /// to a reconciliation warning — the artifact is already delivered and
    /// the cached balance stays unchanged until a later fetch.
    async fn settle(&self, user: &UserId, kind: ActionKind) -> Option<ReconciliationWarning> {
        let cost = kind.cost();
        match self.ledger.debit(user, cost).await {
            Ok(credits) => {
                debug!(%kind, cost, credits, "debit settled");
                None
            }
            Err(e) => {
                warn!(%kind, cost, error = %e, "debit failed after successful unit of work");
                Some(ReconciliationWarning {
                    kind,
                    cost,
                    message: e.to_string(),
                    occurred_at: Utc::now(),
                })
            }
        }
    }
}
