//! Formatted terminal output for every pipeline outcome.
//!
//! We keep formatting code in one place so:
//! - the engine stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! Every numeric answer ends with the operational definitions actually used
//! (timezone, week convention, averaging rule), so an answer is
//! self-auditing rather than a bare number.

use chrono_tz::Tz;

use crate::domain::{Comparison, Intent, TimeWindow};

/// Format the extracted intent echo block.
pub fn format_intent(intent: &Intent) -> String {
    // Serializing the intent struct cannot fail; the Debug fallback is for
    // completeness only.
    let json = serde_json::to_string(intent).unwrap_or_else(|_| format!("{intent:?}"));
    format!("=== Intent ===\n{json}\n")
}

/// Format a computed comparison answer.
pub fn format_answer(
    cmp: &Comparison,
    a_window: &TimeWindow,
    b_window: &TimeWindow,
    tz: Tz,
) -> String {
    let mut out = String::new();

    out.push_str("=== Result ===\n");
    out.push_str(&format!(
        "Yesterday ({}) sales: {}\n",
        a_window.start,
        fmt_amount(cmp.a)
    ));
    out.push_str(&format!(
        "Last week ({} ~ {}) daily average: {}\n",
        b_window.start,
        b_window.end,
        fmt_amount(cmp.b)
    ));

    let pct = match cmp.pct {
        Some(p) => format!(" ({p:+.1}%)"),
        None => String::new(),
    };
    out.push_str(&format!(
        "Difference: {} {}{pct}\n",
        fmt_amount(cmp.diff.abs()),
        cmp.direction.display_name()
    ));

    out.push('\n');
    out.push_str(&definitions_footer(tz));
    out
}

/// Format the non-error "no data in window" message.
pub fn format_insufficient_data(a_window: &TimeWindow, b_window: &TimeWindow) -> String {
    format!(
        "Insufficient data: no records in one or both windows \
         (yesterday {}, last week {} ~ {}).\n",
        a_window.start, b_window.start, b_window.end
    )
}

/// Format the non-error "no handler" message.
pub fn format_unsupported(reason: &str) -> String {
    format!(
        "This combination is not supported yet ({reason}). \
         Supported today: compare yesterday's sales to last week's daily average.\n"
    )
}

fn definitions_footer(tz: Tz) -> String {
    format!(
        "Definitions: yesterday = D-1 in {tz}; last week = most recent complete \
         Monday-Sunday; average = mean of daily totals.\n"
    )
}

/// `12345.678` -> `12,345.68`; integral values drop the fraction entirely.
fn fmt_amount(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();

    let int_part = abs.trunc() as u64;
    let frac = abs.fract();

    let mut grouped = String::new();
    let digits = int_part.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac > 1e-9 {
        out.push_str(&format!("{frac:.2}")[1..]); // ".xx"
    }
    out
}
