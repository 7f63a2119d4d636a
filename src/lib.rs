//! Activity calendar core for the 三省 (Sanxing) journaling app.
//!
//! Turns the backend's sparse `date → answer count` map into a navigable
//! month grid with summary statistics and click-to-drill-down navigation.
//! Rendering, routing, and credential storage live outside this crate; the
//! bearer token is injected as an opaque string.

pub mod api;
pub mod controller;
pub mod error;
pub mod grid;
pub mod stats;
pub mod types;

pub use api::{ActivityRepository, SanxingClient};
pub use controller::{CalendarController, DrillDown, FetchTicket};
pub use error::ActivityError;
pub use grid::{build_month_grid, days_in_month, first_weekday_of_month};
pub use stats::summarize;
pub use types::{
    ActivityCounts, ActivityStats, ActivityTier, AnswerRecord, CalendarCell, MonthCursor,
    WEEKDAY_LABELS,
};
