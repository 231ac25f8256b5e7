//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during one pipeline run
//! - echoed back to the user as JSON (the extracted intent)
//! - constructed directly in tests without any I/O

use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One row of the loaded series: a calendar date and a numeric amount.
///
/// Dates need not be distinct (same-day rows are summed during aggregation)
/// and need not be contiguous. The core never mutates records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub amount: f64,
}

/// What kind of question the model thinks was asked.
///
/// The set is closed on our side, but the wire format is forward-compatible:
/// an unrecognized `intent` value deserializes to `Unknown` and is routed to
/// the unsupported path instead of failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Aggregate,
    Compare,
    #[serde(rename = "topN", alias = "topn")]
    TopN,
    Trend,
    Breakdown,
    #[default]
    #[serde(other)]
    Unknown,
}

/// The `time` object of the intent schema. Both sides are raw strings here;
/// they are only resolved to `TimeRef`s at dispatch time so that junk values
/// surface as "unsupported" rather than a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimeSpec {
    #[serde(default)]
    pub a: Option<String>,
    #[serde(default)]
    pub b: Option<String>,
}

/// Structured representation of the question, as suggested by the model.
///
/// Every field is defaulted: well-formed JSON that is missing members still
/// parses and flows to dispatch, where the gaps make it unsupported. Only
/// text that cannot be recovered as a JSON object at all is a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub intent: IntentKind,
    #[serde(default)]
    pub metric: String,
    #[serde(default)]
    pub time: TimeSpec,
}

/// A named or explicit time reference, prior to resolution against "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRef {
    Yesterday,
    LastWeek,
    LastWeekAvg,
    Last7d,
    /// An explicit single day (`YYYY-MM-DD`).
    Date(NaiveDate),
}

impl TimeRef {
    /// Parse a wire-format time reference.
    ///
    /// Known synonyms for the weekly average are accepted; anything else is
    /// tried as an ISO calendar date. `None` means the string names nothing
    /// we resolve (including malformed dates) — callers report it as an
    /// unsupported reference, never guess.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yesterday" => Some(TimeRef::Yesterday),
            "last_week" => Some(TimeRef::LastWeek),
            "last_week_avg" | "lastweek_avg" | "last_week_average" => Some(TimeRef::LastWeekAvg),
            "last_7d" => Some(TimeRef::Last7d),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .ok()
                .map(TimeRef::Date),
        }
    }
}

/// An inclusive start/end date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of calendar days in the window.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// How to reduce the records inside a window to a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    /// Total of all amounts in the window.
    Sum,
    /// Sum amounts per calendar date, then average the per-date sums.
    ///
    /// This is *not* the mean of individual transaction amounts: a week with
    /// three transactions on one day and one on another averages two
    /// day-totals, not four amounts.
    MeanOfDailySums,
}

/// Whether the compared value went up, down, or stayed put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
    Unchanged,
}

impl Direction {
    pub fn display_name(self) -> &'static str {
        match self {
            Direction::Increase => "increase",
            Direction::Decrease => "decrease",
            Direction::Unchanged => "no change",
        }
    }
}

/// Result of comparing two aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub a: f64,
    pub b: f64,
    pub diff: f64,
    /// Percent change relative to `b`; `None` when `b == 0`.
    pub pct: Option<f64>,
    pub direction: Direction,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AskConfig {
    pub csv_path: PathBuf,
    pub model: String,
    pub question: String,
    /// Reference timezone in which "now" (and therefore "yesterday") is
    /// evaluated. Always explicit; the machine-local zone is never used.
    pub tz: Tz,
    pub show_prompt: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn time_ref_parses_presets_and_synonyms() {
        assert_eq!(TimeRef::parse("yesterday"), Some(TimeRef::Yesterday));
        assert_eq!(TimeRef::parse("last_week"), Some(TimeRef::LastWeek));
        assert_eq!(TimeRef::parse("last_week_avg"), Some(TimeRef::LastWeekAvg));
        assert_eq!(TimeRef::parse("lastweek_avg"), Some(TimeRef::LastWeekAvg));
        assert_eq!(
            TimeRef::parse("last_week_average"),
            Some(TimeRef::LastWeekAvg)
        );
        assert_eq!(TimeRef::parse("last_7d"), Some(TimeRef::Last7d));
        assert_eq!(TimeRef::parse(" Yesterday "), Some(TimeRef::Yesterday));
    }

    #[test]
    fn time_ref_parses_explicit_dates_only_when_valid() {
        assert_eq!(
            TimeRef::parse("2025-08-29"),
            Some(TimeRef::Date(d(2025, 8, 29)))
        );
        assert_eq!(TimeRef::parse("2025-13-99"), None);
        assert_eq!(TimeRef::parse("tomorrow"), None);
        assert_eq!(TimeRef::parse(""), None);
    }

    #[test]
    fn time_window_contains_is_inclusive() {
        let w = TimeWindow {
            start: d(2025, 8, 18),
            end: d(2025, 8, 24),
        };
        assert!(w.contains(d(2025, 8, 18)));
        assert!(w.contains(d(2025, 8, 24)));
        assert!(!w.contains(d(2025, 8, 17)));
        assert!(!w.contains(d(2025, 8, 25)));
        assert_eq!(w.len_days(), 7);
    }

    #[test]
    fn intent_kind_accepts_unknown_values() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"forecast","metric":"sales","time":{}}"#).unwrap();
        assert_eq!(intent.intent, IntentKind::Unknown);
    }

    #[test]
    fn intent_defaults_missing_members() {
        let intent: Intent = serde_json::from_str(r#"{"intent":"compare"}"#).unwrap();
        assert_eq!(intent.intent, IntentKind::Compare);
        assert!(intent.metric.is_empty());
        assert_eq!(intent.time, TimeSpec::default());
    }

    #[test]
    fn intent_kind_topn_wire_names() {
        let a: Intent = serde_json::from_str(r#"{"intent":"topN"}"#).unwrap();
        let b: Intent = serde_json::from_str(r#"{"intent":"topn"}"#).unwrap();
        assert_eq!(a.intent, IntentKind::TopN);
        assert_eq!(b.intent, IntentKind::TopN);
    }
}
