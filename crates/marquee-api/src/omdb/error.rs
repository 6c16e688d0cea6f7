use thiserror::Error;

use crate::traits::{FailureKind, ProviderFailure};

/// Errors from the OMDb API client.
#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ProviderFailure for OmdbError {
    fn kind(&self) -> FailureKind {
        match self {
            Self::Http(_) => FailureKind::Transport,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Api { .. } | Self::Provider(_) | Self::Parse(_) => FailureKind::Provider,
        }
    }
}
