//! Playback state machine over a single generated audio resource.

pub mod resource;

pub use resource::{AudioExport, AudioHandle, AudioResource, FALLBACK_EXPORT_NAME};

use strum::Display;
use tracing::debug;

use self::resource::HandleStore;
use crate::error::{Result, SynthError};

/// Where the controller currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PlaybackStatus {
    Empty,
    Ready,
    Playing,
    Paused,
}

#[derive(Debug)]
enum PlaybackState {
    Empty,
    Ready(AudioResource),
    Playing(AudioResource),
    Paused(AudioResource),
}

/// Finite-state controller over at most one generated audio resource.
///
/// Exactly one handle is live at any time. Replacing the resource
/// terminates any active playback of the prior track and releases its
/// handle before the new one becomes addressable; skipping that release
/// would leak the handle.
#[derive(Debug, Default)]
pub struct PlaybackController {
    store: HandleStore,
    state: PlaybackState,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Empty
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PlaybackStatus {
        match self.state {
            PlaybackState::Empty => PlaybackStatus::Empty,
            PlaybackState::Ready(_) => PlaybackStatus::Ready,
            PlaybackState::Playing(_) => PlaybackStatus::Playing,
            PlaybackState::Paused(_) => PlaybackStatus::Paused,
        }
    }

    /// The current resource, if any.
    pub fn current(&self) -> Option<&AudioResource> {
        match &self.state {
            PlaybackState::Empty => None,
            PlaybackState::Ready(r) | PlaybackState::Playing(r) | PlaybackState::Paused(r) => {
                Some(r)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, PlaybackState::Empty)
    }

    /// Swap in a freshly generated track. Always legal; ends in `Ready`.
    pub fn replace(&mut self, bytes: Vec<u8>, title: impl Into<String>) -> AudioHandle {
        self.release_current();
        let handle = self.store.issue();
        debug!(handle = %handle, "issued audio handle");
        self.state = PlaybackState::Ready(AudioResource::new(handle.clone(), title.into(), bytes));
        handle
    }

    /// Start or resume playback. No-op unless a track is loaded.
    pub fn play(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            PlaybackState::Ready(r) | PlaybackState::Paused(r) => {
                self.state = PlaybackState::Playing(r);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Pause playback. No-op unless playing.
    pub fn pause(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            PlaybackState::Playing(r) => {
                self.state = PlaybackState::Paused(r);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Stop playback, resetting the position to the start. No-op from
    /// `Empty` or `Ready`.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            PlaybackState::Playing(r) | PlaybackState::Paused(r) => {
                self.state = PlaybackState::Ready(r);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Produce a named copy of the current resource without consuming or
    /// releasing it. Playback state is unchanged.
    pub fn export(&self) -> Result<AudioExport> {
        match self.current() {
            Some(resource) => Ok(resource.to_export()),
            None => Err(SynthError::State("No generated audio to export".into())),
        }
    }

    /// Release the current resource and return to `Empty`.
    pub fn clear(&mut self) {
        self.release_current();
    }

    /// Number of live handles.
    pub fn live_handles(&self) -> usize {
        self.store.live_count()
    }

    /// Whether `handle` is still addressable.
    pub fn is_live(&self, handle: &AudioHandle) -> bool {
        self.store.is_live(handle)
    }

    fn release_current(&mut self) {
        // Moving the resource out terminates any active playback of it
        // before the handle is released.
        if let PlaybackState::Ready(r) | PlaybackState::Playing(r) | PlaybackState::Paused(r) =
            std::mem::take(&mut self.state)
        {
            self.store.release(r.handle());
            debug!(handle = %r.handle(), "released audio handle");
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.clear();
    }
}
