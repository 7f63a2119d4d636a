//! Sanxing backend HTTP client.
//!
//! Thin bearer-authenticated wrappers over the REST endpoints the calendar
//! core consumes. The credential is an opaque string injected by the caller
//! — never read from ambient storage, never parsed.
//!
//! Modules:
//! - activity: monthly activity counts + per-day answer drill-down

pub mod activity;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ActivityError;
use crate::types::{ActivityCounts, AnswerRecord};

/// Fixed per-request timeout; expiry surfaces as `ActivityError::Network`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read operations the calendar controller depends on.
///
/// Implemented by [`SanxingClient`] for the real backend and by in-memory
/// fakes in tests. Both operations are idempotent and side-effect-free.
#[async_trait]
pub trait ActivityRepository {
    /// Aggregated answer counts for one month, keyed `YYYY-MM-DD`.
    async fn fetch_monthly_activity(
        &self,
        year: i32,
        month: u32,
    ) -> Result<ActivityCounts, ActivityError>;

    /// All answers submitted on one date. Empty vec (not an error) when the
    /// day has no answers.
    async fn fetch_answers_for_date(
        &self,
        date_key: &str,
    ) -> Result<Vec<AnswerRecord>, ActivityError>;
}

/// HTTP client for the Sanxing backend.
pub struct SanxingClient {
    base_url: String,
    credential: Option<String>,
    http: reqwest::Client,
}

impl SanxingClient {
    /// `credential` is the bearer token, or `None` while logged out — in
    /// which case every fetch fails fast with `MissingCredential` without
    /// touching the network.
    pub fn new(base_url: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
            http: reqwest::Client::new(),
        }
    }

    /// Swap the credential when login state changes. Callers typically
    /// follow this with a controller `refresh`.
    pub fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential;
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn credential(&self) -> Result<&str, ActivityError> {
        self.credential
            .as_deref()
            .ok_or(ActivityError::MissingCredential)
    }
}

/// Map a response to its body text, converting auth and non-2xx statuses to
/// the error taxonomy. The server's own message is extracted from the JSON
/// error body and surfaced verbatim.
pub(crate) async fn read_body(resp: reqwest::Response) -> Result<String, ActivityError> {
    let status = resp.status();
    let body = resp.text().await.map_err(ActivityError::from_transport)?;

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ActivityError::AuthExpired);
    }
    if !status.is_success() {
        log::warn!("sanxing api returned status {status}");
        return Err(ActivityError::Api {
            status: status.as_u16(),
            message: extract_error_message(&body),
        });
    }
    Ok(body)
}

/// Pull the error message out of a JSON error body.
///
/// The backend writes `{"detail": "..."}` (FastAPI convention); `message` is
/// accepted too. Anything else falls through as the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    body.to_string()
}
