use reqwest::StatusCode;

/// Failures reported by a backend collaborator.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("could not decode `{table}` row: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode row: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("not signed in")]
    Unauthenticated,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed file: {0}")]
    Seed(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl BackendError {
    /// Whether the failure came from the remote side being unreachable or
    /// failing, as opposed to a missing row or bad input.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Io(_) => true,
            Self::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
