//! Calendar navigation controller.
//!
//! Owns the month cursor and the lifecycle of activity fetches. The event
//! model is single-threaded run-to-completion: each user action (navigate,
//! refresh, day click) begins at most one fetch, and a response is applied
//! only if no later action superseded it in the meantime.
//!
//! Fetches follow a begin/complete protocol so the stale-response rule is
//! explicit: `begin_fetch` stamps a ticket with the current generation, and
//! `complete_fetch` discards any ticket whose generation is no longer
//! current. Superseding a request cancels interest in its result; the
//! underlying transport call is not aborted.

use chrono::NaiveDate;

use crate::api::ActivityRepository;
use crate::error::ActivityError;
use crate::grid::build_month_grid;
use crate::stats::summarize;
use crate::types::{ActivityCounts, ActivityStats, AnswerRecord, CalendarCell, MonthCursor};

/// A fetch in flight: the cursor it was issued for and the generation that
/// must still be current for its result to apply.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    generation: u64,
    pub cursor: MonthCursor,
}

/// Drill-down request emitted when a day with nonzero activity is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillDown {
    pub date_key: String,
}

/// Stateful coordinator for the activity calendar view.
pub struct CalendarController {
    cursor: MonthCursor,
    loading: bool,
    last_error: Option<ActivityError>,
    /// Latest successfully applied snapshot. `None` until the first
    /// successful fetch — the grid renders all-zero in the meantime.
    counts: Option<ActivityCounts>,
    generation: u64,
}

impl CalendarController {
    /// Start at the month containing `today` (injected, not read from the
    /// system clock here).
    pub fn new(today: NaiveDate) -> Self {
        Self::at(MonthCursor::from_date(today))
    }

    /// Start at an explicit cursor.
    pub fn at(cursor: MonthCursor) -> Self {
        Self {
            cursor,
            loading: false,
            last_error: None,
            counts: None,
            generation: 0,
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&ActivityError> {
        self.last_error.as_ref()
    }

    /// Latest applied counts, if any fetch has succeeded yet.
    pub fn counts(&self) -> Option<&ActivityCounts> {
        self.counts.as_ref()
    }

    // ------------------------------------------------------------------
    // Fetch protocol
    // ------------------------------------------------------------------

    /// Begin a fetch for the current cursor: bumps the generation (stamping
    /// any earlier in-flight fetch stale), enters loading, clears the error.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.last_error = None;
        FetchTicket {
            generation: self.generation,
            cursor: self.cursor,
        }
    }

    /// Apply a fetch result. Returns `false` when the ticket was superseded
    /// and the result discarded — stale data never overwrites the view.
    ///
    /// On a current failure the previous snapshot is retained, so a grid
    /// from an earlier success stays visible alongside the error.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ActivityCounts, ActivityError>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::warn!(
                "discarding stale activity response for {}-{:02}",
                ticket.cursor.year,
                ticket.cursor.month
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(counts) => {
                self.counts = Some(counts);
                self.last_error = None;
            }
            Err(err) => {
                log::warn!(
                    "activity fetch failed for {}-{:02}: {err}",
                    ticket.cursor.year,
                    ticket.cursor.month
                );
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Run one full fetch round trip against a repository.
    pub async fn run_fetch<R: ActivityRepository + ?Sized>(
        &mut self,
        repo: &R,
        ticket: FetchTicket,
    ) -> bool {
        let result = repo
            .fetch_monthly_activity(ticket.cursor.year, ticket.cursor.month)
            .await;
        self.complete_fetch(ticket, result)
    }

    /// Convenience: begin and run a fetch for the current cursor.
    pub async fn load<R: ActivityRepository + ?Sized>(&mut self, repo: &R) -> bool {
        let ticket = self.begin_fetch();
        self.run_fetch(repo, ticket).await
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Move to the previous month (December of the prior year from January)
    /// and begin a fetch for it.
    pub fn navigate_previous(&mut self) -> FetchTicket {
        self.cursor = self.cursor.previous();
        self.begin_fetch()
    }

    /// Move to the next month (January of the next year from December) and
    /// begin a fetch for it.
    pub fn navigate_next(&mut self) -> FetchTicket {
        self.cursor = self.cursor.next();
        self.begin_fetch()
    }

    /// Refetch the current cursor without moving it — used after the
    /// credential becomes available, and as the retry path after an error.
    pub fn refresh(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Map a day click to a drill-down request. Days with zero (or unknown)
    /// activity are a silent no-op, never an error.
    pub fn select_day(&self, date_key: &str) -> Option<DrillDown> {
        let count = self.counts.as_ref().map_or(0, |c| c.count_for(date_key));
        (count > 0).then(|| DrillDown {
            date_key: date_key.to_string(),
        })
    }

    /// Resolve a day click all the way to its answers. `Ok(None)` when the
    /// click was a no-op (zero-count day).
    pub async fn open_day<R: ActivityRepository + ?Sized>(
        &self,
        repo: &R,
        date_key: &str,
    ) -> Result<Option<Vec<AnswerRecord>>, ActivityError> {
        match self.select_day(date_key) {
            Some(drill) => repo.fetch_answers_for_date(&drill.date_key).await.map(Some),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Month grid for the current cursor and applied counts.
    pub fn grid(&self, today: NaiveDate) -> Vec<CalendarCell> {
        let empty = ActivityCounts::default();
        build_month_grid(self.cursor, self.counts.as_ref().unwrap_or(&empty), today)
    }

    /// Summary statistics for the applied counts.
    pub fn stats(&self) -> ActivityStats {
        let empty = ActivityCounts::default();
        summarize(self.counts.as_ref().unwrap_or(&empty))
    }
}
