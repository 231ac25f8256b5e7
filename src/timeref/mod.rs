//! Time-reference resolution.
//!
//! Maps a `TimeRef` plus a reference "now" instant to a concrete inclusive
//! date window. Design rules:
//!
//! - windows are computed purely from `now`; the resolver never looks at the
//!   loaded series
//! - `now` carries an explicit IANA timezone, so "yesterday" means D-1 in
//!   that zone regardless of where the binary runs
//! - callers sample `now` once per pipeline run and reuse it for both sides
//!   of a comparison, so one invocation is self-consistent

use chrono::{DateTime, Datelike, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::domain::{TimeRef, TimeWindow};

/// Resolve a time reference against a fixed "now".
pub fn resolve(r: TimeRef, now: DateTime<Tz>) -> TimeWindow {
    let today = now.date_naive();
    match r {
        TimeRef::Yesterday => TimeWindow::single(today - Duration::days(1)),
        TimeRef::LastWeek | TimeRef::LastWeekAvg => last_completed_week(today),
        TimeRef::Last7d => TimeWindow {
            start: today - Duration::days(7),
            end: today - Duration::days(1),
        },
        TimeRef::Date(d) => TimeWindow::single(d),
    }
}

/// The most recently completed Monday–Sunday week strictly before today's
/// week. Today itself is always excluded, even when it is a Sunday.
///
/// Starting from yesterday, step back to the nearest Sunday on or before it
/// (`(weekday_mon0 + 1) mod 7` days): that Sunday ends the window, and the
/// window spans the six days before it.
fn last_completed_week(today: NaiveDate) -> TimeWindow {
    let yday = today - Duration::days(1);
    let back_to_sunday = (yday.weekday().num_days_from_monday() + 1) % 7;
    let end = yday - Duration::days(i64::from(back_to_sunday));
    TimeWindow {
        start: end - Duration::days(6),
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use chrono_tz::Europe::London;

    fn now_on(y: i32, m: u32, d: u32) -> DateTime<Tz> {
        London.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn yesterday_is_single_day_before_now() {
        let w = resolve(TimeRef::Yesterday, now_on(2025, 8, 30));
        assert_eq!(w, TimeWindow::single(d(2025, 8, 29)));
    }

    #[test]
    fn yesterday_crosses_month_boundary() {
        let w = resolve(TimeRef::Yesterday, now_on(2025, 9, 1));
        assert_eq!(w, TimeWindow::single(d(2025, 8, 31)));
    }

    #[test]
    fn last_week_is_monday_to_sunday_before_current_week() {
        // 2025-08-30 is a Saturday; the last completed week is Aug 18-24.
        let w = resolve(TimeRef::LastWeekAvg, now_on(2025, 8, 30));
        assert_eq!(w.start, d(2025, 8, 18));
        assert_eq!(w.end, d(2025, 8, 24));
    }

    #[test]
    fn last_week_on_monday_ends_yesterday() {
        // When today is Monday, the completed week ended yesterday (Sunday).
        let w = resolve(TimeRef::LastWeek, now_on(2025, 8, 25));
        assert_eq!(w.start, d(2025, 8, 18));
        assert_eq!(w.end, d(2025, 8, 24));
    }

    #[test]
    fn last_week_on_sunday_excludes_the_current_week() {
        // Today is Sunday Aug 24: its own (almost complete) week does not
        // count; the window is the week before.
        let w = resolve(TimeRef::LastWeekAvg, now_on(2025, 8, 24));
        assert_eq!(w.start, d(2025, 8, 11));
        assert_eq!(w.end, d(2025, 8, 17));
    }

    #[test]
    fn last_week_invariants_hold_for_every_weekday() {
        // 7-day window, Monday through Sunday, never including today.
        for offset in 0..14 {
            let now = now_on(2025, 8, 10) + Duration::days(offset);
            let w = resolve(TimeRef::LastWeekAvg, now);
            assert_eq!(w.len_days(), 7);
            assert_eq!(w.start.weekday(), Weekday::Mon);
            assert_eq!(w.end.weekday(), Weekday::Sun);
            assert!(w.end < now.date_naive());
            assert!(!w.contains(now.date_naive()));
        }
    }

    #[test]
    fn last_7d_is_the_seven_days_ending_yesterday() {
        let w = resolve(TimeRef::Last7d, now_on(2025, 8, 30));
        assert_eq!(w.start, d(2025, 8, 23));
        assert_eq!(w.end, d(2025, 8, 29));
        assert_eq!(w.len_days(), 7);
    }

    #[test]
    fn explicit_date_resolves_to_itself() {
        let w = resolve(TimeRef::Date(d(2025, 1, 15)), now_on(2025, 8, 30));
        assert_eq!(w, TimeWindow::single(d(2025, 1, 15)));
    }
}
