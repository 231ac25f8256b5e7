//! Dispatch: match a parsed intent against the table of supported
//! `(kind, metric, time.a, time.b)` combinations.
//!
//! Supported combinations live in a rule table rather than a branch chain,
//! so wiring up a new combination is a table insertion plus a handler fn.
//! Anything the table does not match yields `Outcome::Unsupported` with a
//! plain message — a forgiving exit, not an error.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::domain::{
    AggregateMode, Comparison, Intent, IntentKind, Record, TimeRef, TimeWindow,
};
use crate::engine::{aggregate, compare};
use crate::timeref::resolve;

/// Everything a handler needs: the loaded series and the single "now"
/// sampled at pipeline start (reused for both sides of a comparison).
pub struct ExecContext<'a> {
    pub records: &'a [Record],
    pub now: DateTime<Tz>,
}

/// What executing (or failing to execute) an intent produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A comparison was computed; windows are kept for the report.
    Compared {
        cmp: Comparison,
        a_window: TimeWindow,
        b_window: TimeWindow,
    },
    /// One or both windows held no data. Not an error; exit 0.
    InsufficientData {
        a_window: TimeWindow,
        b_window: TimeWindow,
    },
    /// Well-formed intent, but no handler for the combination. Exit 0.
    Unsupported { reason: String },
}

type Handler = fn(&ExecContext, TimeRef, TimeRef) -> Outcome;

/// One supported combination.
struct Rule {
    kind: IntentKind,
    metrics: &'static [&'static str],
    a: TimeRef,
    b: Option<TimeRef>,
    run: Handler,
}

/// The supported-combination table. Currently a single entry:
/// compare(yesterday, last_week_avg) over a sales-like metric.
const RULES: &[Rule] = &[Rule {
    kind: IntentKind::Compare,
    metrics: &["sales", "sales_amount"],
    a: TimeRef::Yesterday,
    b: Some(TimeRef::LastWeekAvg),
    run: run_sum_vs_daily_avg,
}];

/// Look the intent up in the rule table and run the handler.
pub fn dispatch(intent: &Intent, ctx: &ExecContext) -> Outcome {
    let metric = intent.metric.trim().to_ascii_lowercase();

    let a = match &intent.time.a {
        Some(raw) => match TimeRef::parse(raw) {
            Some(r) => Some(r),
            None => {
                return Outcome::Unsupported {
                    reason: format!("unrecognized time reference '{raw}'"),
                };
            }
        },
        None => None,
    };
    let b = match &intent.time.b {
        Some(raw) => match TimeRef::parse(raw) {
            Some(r) => Some(r),
            None => {
                return Outcome::Unsupported {
                    reason: format!("unrecognized time reference '{raw}'"),
                };
            }
        },
        None => None,
    };

    for rule in RULES {
        if rule.kind == intent.intent
            && rule.metrics.contains(&metric.as_str())
            && a == Some(rule.a)
            && b == rule.b
        {
            // Single-reference rules pass `a` for both sides.
            return (rule.run)(ctx, rule.a, rule.b.unwrap_or(rule.a));
        }
    }

    Outcome::Unsupported {
        reason: format!(
            "no handler for intent={:?} metric='{}' time.a={:?} time.b={:?}",
            intent.intent, intent.metric, intent.time.a, intent.time.b
        ),
    }
}

/// compare(single-day sum, multi-day mean of daily sums).
fn run_sum_vs_daily_avg(ctx: &ExecContext, a: TimeRef, b: TimeRef) -> Outcome {
    let a_window = resolve(a, ctx.now);
    let b_window = resolve(b, ctx.now);

    let a_value = aggregate(ctx.records, a_window, AggregateMode::Sum);
    let b_value = aggregate(ctx.records, b_window, AggregateMode::MeanOfDailySums);

    match compare(a_value, b_value) {
        Some(cmp) => Outcome::Compared {
            cmp,
            a_window,
            b_window,
        },
        None => Outcome::InsufficientData { a_window, b_window },
    }
}
