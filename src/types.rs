use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sunday-first weekday header labels used by the calendar grid.
pub const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

// ============================================================================
// Activity counts
// ============================================================================

/// Sparse per-day answer counts for one month, keyed by `YYYY-MM-DD`.
///
/// An absent key means zero activity that day — the backend only sends dates
/// with at least one answer. Each fetch replaces the whole snapshot; counts
/// are never merged incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityCounts(BTreeMap<String, u32>);

impl ActivityCounts {
    pub fn count_for(&self, date_key: &str) -> u32 {
        self.0.get(date_key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, u32>> for ActivityCounts {
    fn from(map: BTreeMap<String, u32>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, u32)> for ActivityCounts {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Activity tier
// ============================================================================

/// Display-intensity bucket for a day's answer count.
///
/// Fixed thresholds: 0 → None, 1–2 → Low, 3–5 → Medium, 6+ → High.
/// Purely a view concern; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityTier {
    None,
    Low,
    Medium,
    High,
}

impl ActivityTier {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => ActivityTier::None,
            1..=2 => ActivityTier::Low,
            3..=5 => ActivityTier::Medium,
            _ => ActivityTier::High,
        }
    }

    /// Ordinal level 0–3, matching the renderer's intensity scale.
    pub fn level(self) -> u8 {
        match self {
            ActivityTier::None => 0,
            ActivityTier::Low => 1,
            ActivityTier::Medium => 2,
            ActivityTier::High => 3,
        }
    }
}

// ============================================================================
// Calendar cells
// ============================================================================

/// One slot in the month grid.
///
/// `Blank` cells pad the first row so day 1 lands under its weekday column.
/// The whole sequence is regenerated whenever (cursor, counts) change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell {
    Blank,
    Day {
        day: u32,
        date_key: String,
        count: u32,
        tier: ActivityTier,
        is_today: bool,
    },
}

impl CalendarCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, CalendarCell::Blank)
    }
}

// ============================================================================
// Month cursor
// ============================================================================

/// The (year, month) pair identifying the displayed month.
///
/// `month` is always in 1..=12; `previous`/`next` handle the year rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// True when `date` falls inside this month (local calendar comparison).
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Zero-padded `YYYY-MM-DD` key for a day of this month.
    pub fn date_key(self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, day)
    }
}

// ============================================================================
// Answer records (drill-down payload)
// ============================================================================

/// One answer submitted on a given day, as returned by
/// `GET /api/user/answers/by-date`. Read-only; fetched per selected date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub id: i64,
    pub question_id: i64,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

impl AnswerRecord {
    /// Submission time as `HH:MM` for display, or `None` if `created_at`
    /// is not a parseable timestamp.
    pub fn created_time_display(&self) -> Option<String> {
        parse_answer_datetime(&self.created_at).map(|dt| dt.format("%H:%M").to_string())
    }
}

/// Parse a backend timestamp. The API writes RFC 3339, but older rows carry
/// naive `YYYY-MM-DD HH:MM:SS` strings, so both are accepted.
pub fn parse_answer_datetime(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(&s.replace('Z', "+00:00"))
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        })
}

// ============================================================================
// Summary statistics
// ============================================================================

/// Monthly summary derived from the sparse count map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityStats {
    pub total_answers: u32,
    pub active_days: u32,
    pub average_per_active_day: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_exact() {
        assert_eq!(ActivityTier::from_count(0), ActivityTier::None);
        assert_eq!(ActivityTier::from_count(1), ActivityTier::Low);
        assert_eq!(ActivityTier::from_count(2), ActivityTier::Low);
        assert_eq!(ActivityTier::from_count(3), ActivityTier::Medium);
        assert_eq!(ActivityTier::from_count(5), ActivityTier::Medium);
        assert_eq!(ActivityTier::from_count(6), ActivityTier::High);
        assert_eq!(ActivityTier::from_count(100), ActivityTier::High);
    }

    #[test]
    fn test_tier_levels() {
        assert_eq!(ActivityTier::None.level(), 0);
        assert_eq!(ActivityTier::Low.level(), 1);
        assert_eq!(ActivityTier::Medium.level(), 2);
        assert_eq!(ActivityTier::High.level(), 3);
    }

    #[test]
    fn test_cursor_previous_rolls_over_year() {
        let cursor = MonthCursor {
            year: 2025,
            month: 1,
        };
        assert_eq!(
            cursor.previous(),
            MonthCursor {
                year: 2024,
                month: 12
            }
        );
    }

    #[test]
    fn test_cursor_next_rolls_over_year() {
        let cursor = MonthCursor {
            year: 2025,
            month: 12,
        };
        assert_eq!(
            cursor.next(),
            MonthCursor {
                year: 2026,
                month: 1
            }
        );
    }

    #[test]
    fn test_cursor_previous_next_mid_year() {
        let cursor = MonthCursor {
            year: 2025,
            month: 6,
        };
        assert_eq!(cursor.previous().month, 5);
        assert_eq!(cursor.next().month, 7);
        assert_eq!(cursor.previous().year, 2025);
    }

    #[test]
    fn test_date_key_zero_padding() {
        let cursor = MonthCursor {
            year: 2025,
            month: 3,
        };
        assert_eq!(cursor.date_key(7), "2025-03-07");
        assert_eq!(cursor.date_key(31), "2025-03-31");
    }

    #[test]
    fn test_cursor_contains() {
        let cursor = MonthCursor {
            year: 2025,
            month: 3,
        };
        assert!(cursor.contains(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
        assert!(!cursor.contains(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()));
        assert!(!cursor.contains(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
    }

    #[test]
    fn test_counts_absent_key_is_zero() {
        let counts: ActivityCounts = [("2025-03-01".to_string(), 3u32)].into_iter().collect();
        assert_eq!(counts.count_for("2025-03-01"), 3);
        assert_eq!(counts.count_for("2025-03-02"), 0);
    }

    #[test]
    fn test_answer_record_deserialization() {
        let json = r#"{
            "id": 42,
            "question_id": 7,
            "question_text": "今天你学到了什么？",
            "tag": "成长",
            "content": "读完了一章《论语》。",
            "created_at": "2025-03-01T21:35:00Z"
        }"#;

        let record: AnswerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.question_id, 7);
        assert_eq!(record.tag.as_deref(), Some("成长"));
        assert_eq!(record.created_time_display().as_deref(), Some("21:35"));
    }

    #[test]
    fn test_answer_record_optional_fields_default() {
        let json = r#"{ "id": 1, "question_id": 2 }"#;
        let record: AnswerRecord = serde_json::from_str(json).unwrap();
        assert!(record.tag.is_none());
        assert!(record.content.is_empty());
        assert!(record.created_time_display().is_none());
    }

    #[test]
    fn test_parse_answer_datetime_naive() {
        let dt = parse_answer_datetime("2025-03-01 09:05:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "09:05");
    }

    #[test]
    fn test_parse_answer_datetime_garbage() {
        assert!(parse_answer_datetime("").is_none());
        assert!(parse_answer_datetime("not a date").is_none());
    }
}
