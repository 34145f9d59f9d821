//! Error types for the todo actions.
//!
//! # Design
//! Nothing here is retried or translated. Store and remote failures are
//! wrapped as-is so a caller can tell which half of a store/remote pair
//! failed, which matters because a failed chain leaves the two out of sync.

use thiserror::Error;

/// Errors returned by `TodoClient` and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404. The todo does not exist remotely.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors returned by `WidgetStore` implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("widget `{0}` not found")]
    NotFound(String),

    #[error("widget `{0}` already exists")]
    AlreadyExists(String),
}

/// Error returned by every action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("widget store: {0}")]
    Store(#[from] StoreError),

    #[error("remote: {0}")]
    Remote(#[from] ApiError),

    /// An untyped request could not be turned into an `ActionRequest`.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors raised while loading `Settings`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Empty { name: &'static str },

    #[error("{name} is not valid unicode")]
    NotUnicode { name: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_converts_into_action_error() {
        let err: ActionError = StoreError::NotFound("todo-list".to_string()).into();
        assert!(matches!(err, ActionError::Store(StoreError::NotFound(_))));
        assert_eq!(err.to_string(), "widget store: widget `todo-list` not found");
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = ApiError::HttpError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        let wrapped: ActionError = err.into();
        assert_eq!(wrapped.to_string(), "remote: HTTP 500: boom");
    }
}
