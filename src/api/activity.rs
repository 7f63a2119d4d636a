//! Activity endpoints — monthly counts and per-day answers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::{read_body, ActivityRepository, SanxingClient, REQUEST_TIMEOUT};
use crate::error::ActivityError;
use crate::types::{ActivityCounts, AnswerRecord};

// ============================================================================
// API response types (deserialized from Sanxing backend JSON)
// ============================================================================

/// `GET /api/user/activity` body. A missing `daily_counts` key deserializes
/// to an empty map rather than failing — the grid then renders all-zero.
#[derive(Debug, Deserialize)]
struct MonthlyActivityResponse {
    #[serde(default)]
    daily_counts: BTreeMap<String, u32>,
}

/// `GET /api/user/answers/by-date` body; missing `answers` means none.
#[derive(Debug, Deserialize)]
struct AnswersByDateResponse {
    #[serde(default)]
    answers: Vec<AnswerRecord>,
}

// ============================================================================
// Endpoint wrappers
// ============================================================================

impl SanxingClient {
    /// Fetch aggregated answer counts for one month.
    pub async fn fetch_monthly_activity(
        &self,
        year: i32,
        month: u32,
    ) -> Result<ActivityCounts, ActivityError> {
        let token = self.credential()?;
        let resp = self
            .http
            .get(format!("{}/api/user/activity", self.base_url))
            .bearer_auth(token)
            .query(&[("year", year.to_string()), ("month", month.to_string())])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(ActivityError::from_transport)?;

        let body = read_body(resp).await?;
        let parsed: MonthlyActivityResponse = serde_json::from_str(&body)?;
        Ok(ActivityCounts::from(parsed.daily_counts))
    }

    /// Fetch the answers submitted on one date (`YYYY-MM-DD`).
    pub async fn fetch_answers_for_date(
        &self,
        date_key: &str,
    ) -> Result<Vec<AnswerRecord>, ActivityError> {
        let token = self.credential()?;
        let resp = self
            .http
            .get(format!("{}/api/user/answers/by-date", self.base_url))
            .bearer_auth(token)
            .query(&[("date", date_key)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(ActivityError::from_transport)?;

        let body = read_body(resp).await?;
        let parsed: AnswersByDateResponse = serde_json::from_str(&body)?;
        Ok(parsed.answers)
    }
}

#[async_trait]
impl ActivityRepository for SanxingClient {
    async fn fetch_monthly_activity(
        &self,
        year: i32,
        month: u32,
    ) -> Result<ActivityCounts, ActivityError> {
        SanxingClient::fetch_monthly_activity(self, year, month).await
    }

    async fn fetch_answers_for_date(
        &self,
        date_key: &str,
    ) -> Result<Vec<AnswerRecord>, ActivityError> {
        SanxingClient::fetch_answers_for_date(self, date_key).await
    }
}
