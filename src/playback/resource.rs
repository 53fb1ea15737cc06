//! Generated audio artifacts and their addressable handles.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

/// Export name used when the track title is blank.
pub const FALLBACK_EXPORT_NAME: &str = "suno_synth_music";

/// Addressable reference to a generated audio artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioHandle(Uuid);

impl AudioHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AudioHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local://{}", self.0.simple())
    }
}

/// Tracks live audio handles — the local analog of object-URL scoped
/// resources. Issuing and releasing are observable for leak assertions.
#[derive(Debug, Default)]
pub(crate) struct HandleStore {
    live: Mutex<HashSet<AudioHandle>>,
}

impl HandleStore {
    pub(crate) fn issue(&self) -> AudioHandle {
        let handle = AudioHandle::new();
        self.live.lock().unwrap().insert(handle.clone());
        handle
    }

    /// Release a handle. Returns false if it was not live.
    pub(crate) fn release(&self, handle: &AudioHandle) -> bool {
        self.live.lock().unwrap().remove(handle)
    }

    pub(crate) fn is_live(&self, handle: &AudioHandle) -> bool {
        self.live.lock().unwrap().contains(handle)
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live.lock().unwrap().len()
    }
}

/// A generated audio artifact: binary payload, addressable handle, and the
/// logical title used for naming on export.
#[derive(Debug)]
pub struct AudioResource {
    handle: AudioHandle,
    title: String,
    bytes: Vec<u8>,
}

impl AudioResource {
    pub(crate) fn new(handle: AudioHandle, title: String, bytes: Vec<u8>) -> Self {
        Self {
            handle,
            title,
            bytes,
        }
    }

    pub fn handle(&self) -> &AudioHandle {
        &self.handle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Named copy for export. Does not consume the resource.
    pub(crate) fn to_export(&self) -> AudioExport {
        let title = self.title.trim();
        let stem = if title.is_empty() {
            FALLBACK_EXPORT_NAME
        } else {
            title
        };
        AudioExport {
            file_name: format!("{stem}.mp3"),
            bytes: self.bytes.clone(),
        }
    }
}

/// A named copy of a generated track, ready to be written out.
#[derive(Debug, Clone)]
pub struct AudioExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AudioExport {
    /// Write the copy into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
