use common::error::ValidationError;

use crate::backend::BackendError;

/// Where the dashboard sends the user when it cannot open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    /// Signed in, but no company registered yet.
    Setup,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("no company registered for this account")]
    NoCompany,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl LoadError {
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            Self::Unauthenticated => Some(Redirect::Login),
            Self::NoCompany => Some(Redirect::Setup),
            Self::Backend(_) => None,
        }
    }
}

/// Why a dashboard action did not go through. Local state is unchanged in
/// every case.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("an upload is already in progress")]
    Busy,

    #[error("cancelled")]
    Cancelled,
}
