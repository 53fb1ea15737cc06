//! Error types for SunoSynth.

use thiserror::Error;

use crate::actions::ActionKind;

/// Primary error type for all SunoSynth operations.
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Insufficient credits: need {required}, have {available}")]
    InsufficientCredits { required: u32, available: u32 },

    #[error("{kind} is already in progress")]
    Busy { kind: ActionKind },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid state: {0}")]
    State(String),

    #[error("Service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Local admission rejection — no network call was made.
    Rejection,
    Validation,
    Authentication,
    State,
    /// Connectivity failure (includes timeouts reported by a collaborator call).
    Transport,
    /// Collaborator reachable but reported failure.
    Service,
    Internal,
}

impl SynthError {
    /// Create a service error.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientCredits { .. } | Self::Busy { .. } => ErrorCategory::Rejection,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::State(_) => ErrorCategory::State,
            Self::Transport(_) | Self::Timeout(_) => ErrorCategory::Transport,
            Self::Service { .. } => ErrorCategory::Service,
            Self::Serialization(_) | Self::Io(_) | Self::Configuration(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Whether this error was resolved locally, before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Rejection
                | ErrorCategory::Validation
                | ErrorCategory::Authentication
                | ErrorCategory::State
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SynthError>;
