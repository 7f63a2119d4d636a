//! Month grid construction.
//!
//! Pure functions from (cursor, counts, today) to an ordered cell sequence.
//! The grid is `first_weekday + days_in_month` cells long: leading blanks
//! align day 1 under its weekday column, then one cell per day. Row wrapping
//! into weeks of 7 is the renderer's concern.
//!
//! "Today" is injected by the caller — nothing here reads the system clock,
//! and no timezone conversion happens: date keys and `today` are compared as
//! local calendar dates.

use chrono::{Datelike, NaiveDate};

use crate::types::{ActivityCounts, ActivityTier, CalendarCell, MonthCursor};

/// Weekday column index (0=Sunday..6=Saturday) of day 1 of the month.
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Number of days in (year, month), leap-year aware. 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(n) => (n - first).num_days() as u32,
        None => 0,
    }
}

/// Build the month grid for a cursor.
///
/// Counts are looked up per day from the sparse map (absent → 0) and bucketed
/// into tiers; `is_today` is set on at most one cell.
pub fn build_month_grid(
    cursor: MonthCursor,
    counts: &ActivityCounts,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let leading = first_weekday_of_month(cursor.year, cursor.month);
    let days = days_in_month(cursor.year, cursor.month);
    let is_current_month = cursor.contains(today);

    let mut cells = Vec::with_capacity((leading + days) as usize);
    for _ in 0..leading {
        cells.push(CalendarCell::Blank);
    }
    for day in 1..=days {
        let date_key = cursor.date_key(day);
        let count = counts.count_for(&date_key);
        cells.push(CalendarCell::Day {
            day,
            date_key,
            count,
            tier: ActivityTier::from_count(count),
            is_today: is_current_month && day == today.day(),
        });
    }
    cells
}
