//! Error type shared by every algorithm in the crate.
//!
//! "No solution" is not an error: searches return `Ok(None)` when the open
//! set runs dry. Only contract violations, unsupported optional features and
//! bad configuration surface as [`SearchError`].

use std::fmt::Debug;
use thiserror::Error;

/// Errors raised while solving a search or planning problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// An action was applied to a state where it is not applicable.
    #[error("action {action} is not applicable in state {state}")]
    InapplicableAction {
        /// Debug rendering of the offending action.
        action: String,
        /// Debug rendering of the state.
        state: String,
    },

    /// The requested optional feature is not provided.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A parallel worker failed; carries the worker's error message.
    #[error("worker failed: {0}")]
    Worker(String),
}

impl SearchError {
    /// Builds an [`SearchError::InapplicableAction`] from any debuggable pair.
    pub fn inapplicable<A: Debug, S: Debug>(action: &A, state: &S) -> Self {
        SearchError::InapplicableAction {
            action: format!("{action:?}"),
            state: format!("{state:?}"),
        }
    }

    /// Shorthand for [`SearchError::InvalidConfig`].
    pub fn config(msg: impl Into<String>) -> Self {
        SearchError::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inapplicable_message() {
        let err = SearchError::inapplicable(&"north", &(0, 0));
        assert_eq!(
            err.to_string(),
            "action \"north\" is not applicable in state (0, 0)"
        );
    }

    #[test]
    fn test_config_message() {
        let err = SearchError::config("weight must be >= 1");
        assert!(matches!(err, SearchError::InvalidConfig(_)));
        assert!(err.to_string().contains("weight"));
    }
}
