//! Monthly summary statistics over the sparse count map.

use crate::types::{ActivityCounts, ActivityStats};

/// Reduce a month's counts to (total, active days, average per active day).
///
/// The average is rounded to one decimal place, half-up — the single rounding
/// rule for this number; renderers display it as-is.
pub fn summarize(counts: &ActivityCounts) -> ActivityStats {
    let total_answers: u32 = counts.iter().map(|(_, c)| c).sum();
    let active_days = counts.iter().filter(|(_, c)| *c > 0).count() as u32;
    let average_per_active_day = if active_days > 0 {
        round_half_up_one_decimal(f64::from(total_answers) / f64::from(active_days))
    } else {
        0.0
    };

    ActivityStats {
        total_answers,
        active_days,
        average_per_active_day,
    }
}

// f64::round ties away from zero, which is half-up for these non-negative
// averages.
fn round_half_up_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, u32)]) -> ActivityCounts {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&ActivityCounts::default());
        assert_eq!(stats.total_answers, 0);
        assert_eq!(stats.active_days, 0);
        assert_eq!(stats.average_per_active_day, 0.0);
    }

    #[test]
    fn test_summarize_two_days() {
        let stats = summarize(&counts(&[("2025-01-01", 3), ("2025-01-02", 2)]));
        assert_eq!(stats.total_answers, 5);
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.average_per_active_day, 2.5);
    }

    #[test]
    fn test_average_rounds_half_up() {
        // 7 / 4 = 1.75 → 1.8 under half-up.
        let stats = summarize(&counts(&[
            ("2025-01-01", 1),
            ("2025-01-02", 2),
            ("2025-01-03", 3),
            ("2025-01-04", 1),
        ]));
        assert_eq!(stats.average_per_active_day, 1.8);
    }

    #[test]
    fn test_average_rounds_down_below_midpoint() {
        // 4 / 3 = 1.333… → 1.3
        let stats = summarize(&counts(&[
            ("2025-01-01", 1),
            ("2025-01-02", 1),
            ("2025-01-03", 2),
        ]));
        assert_eq!(stats.average_per_active_day, 1.3);
    }

    #[test]
    fn test_single_day() {
        let stats = summarize(&counts(&[("2025-01-31", 6)]));
        assert_eq!(stats.total_answers, 6);
        assert_eq!(stats.active_days, 1);
        assert_eq!(stats.average_per_active_day, 6.0);
    }
}
