use marquee_api::{FailureKind, ProviderFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("provider error ({kind:?}): {message}")]
    Provider { kind: FailureKind, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn provider<E: ProviderFailure>(err: E) -> Self {
        Self::Provider {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
