//! Errors returned to the dashboard by guarded actions.

use thiserror::Error;

/// Why an action did not complete.
///
/// Every variant carries the message the dashboard shows to the user.
/// Authorization and validation messages are already localized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The caller's role lacks the permission the action requires.
    #[error("{0}")]
    Unauthorized(String),

    /// The request was rejected before reaching the store.
    #[error("{0}")]
    Validation(String),

    /// The store refused or failed the change.
    #[error("{0}")]
    Store(String),
}

impl ActionError {
    /// The user-visible message.
    pub fn message(&self) -> &str {
        match self {
            ActionError::Unauthorized(m) | ActionError::Validation(m) | ActionError::Store(m) => m,
        }
    }

    /// Whether this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ActionError::Unauthorized(_))
    }
}

impl From<hamqrg_core::Error> for ActionError {
    fn from(err: hamqrg_core::Error) -> Self {
        match err {
            hamqrg_core::Error::Store(message) => ActionError::Store(message),
            other => ActionError::Store(other.to_string()),
        }
    }
}

/// Result type for guarded actions.
pub type ActionResult<T = ()> = std::result::Result<T, ActionError>;
