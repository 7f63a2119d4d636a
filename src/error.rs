//! Error taxonomy for the activity calendar core.
//!
//! Three user-visible classes: auth (missing or rejected credential),
//! network (transport/timeout), and API (non-2xx with a server message).
//! All of them are recovered at the controller boundary — a failed fetch
//! parks the controller in an error state and waits for the next
//! user-initiated navigation or refresh.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActivityError {
    /// No credential was supplied. The client refuses to issue the request
    /// at all — this is the "not logged in" branch, not a network failure.
    #[error("Not logged in")]
    MissingCredential,

    /// The server rejected the credential (401/403).
    #[error("Credential expired or rejected")]
    AuthExpired,

    /// Transport failure, including the fixed request timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the server-supplied error verbatim.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body that is not valid JSON at all.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ActivityError {
    /// True for both auth branches — callers route these to the login UI
    /// rather than the generic error banner.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ActivityError::MissingCredential | ActivityError::AuthExpired
        )
    }

    /// The message shown in the error banner. For API errors this is the
    /// server's own message, passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ActivityError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ActivityError::Network(format!("request timed out: {err}"))
        } else {
            ActivityError::Network(err.to_string())
        }
    }
}
