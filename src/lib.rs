//! SunoSynth — credit-metered AI music generation core.
//!
//! Orchestrates a server-tracked credit balance across generation actions
//! (AI lyric drafting, music synthesis, download) and manages the lifecycle
//! of the generated audio artifact through a playback state machine. UI,
//! routing, and authentication are external collaborators.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sunosynth::prelude::*;
//!
//! # async fn example() -> sunosynth::error::Result<()> {
//! let config = SynthConfig::from_env()?;
//! let identity = Arc::new(StaticIdentity::new("user-1"));
//! let orchestrator = ActionOrchestrator::from_config(&config, identity);
//! let mut playback = PlaybackController::new();
//!
//! orchestrator.refresh_balance().await?;
//!
//! let request = MusicRequest::builder()
//!     .title("Neon Rain")
//!     .lyrics("City lights dissolve into the sea...")
//!     .style(MusicStyle::Jazz)
//!     .build();
//! let generated = orchestrator.generate_music(&request).await?;
//! playback.replace(generated.payload, "Neon Rain");
//! playback.play();
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod orchestrator;
pub mod playback;
pub mod prelude;
pub mod services;
pub mod util;
