//! Window aggregation over the series.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{AggregateMode, Record, TimeWindow};

/// Reduce the records falling inside `window` (inclusive both ends) to a
/// single number.
///
/// Returns `None` when no record matches: "no data" is propagated, never
/// treated as zero, so downstream comparison can take the explicit
/// insufficient-data path.
pub fn aggregate(records: &[Record], window: TimeWindow, mode: AggregateMode) -> Option<f64> {
    let hits: Vec<&Record> = records
        .iter()
        .filter(|r| window.contains(r.date))
        .collect();

    if hits.is_empty() {
        return None;
    }

    match mode {
        AggregateMode::Sum => Some(hits.iter().map(|r| r.amount).sum()),
        AggregateMode::MeanOfDailySums => {
            // Group by calendar date first; the mean is over day-totals, not
            // over individual transaction amounts.
            let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
            for r in &hits {
                *by_day.entry(r.date).or_insert(0.0) += r.amount;
            }
            let total: f64 = by_day.values().sum();
            Some(total / by_day.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(day: u32, amount: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2025, 8, day).unwrap(),
            amount,
        }
    }

    fn window(start: u32, end: u32) -> TimeWindow {
        TimeWindow {
            start: NaiveDate::from_ymd_opt(2025, 8, start).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 8, end).unwrap(),
        }
    }

    #[test]
    fn sum_totals_all_matching_records() {
        let records = vec![rec(18, 100.0), rec(18, 50.0), rec(19, 25.0), rec(26, 999.0)];
        assert_eq!(
            aggregate(&records, window(18, 24), AggregateMode::Sum),
            Some(175.0)
        );
    }

    #[test]
    fn empty_window_is_none_not_zero() {
        let records = vec![rec(18, 100.0)];
        assert_eq!(aggregate(&records, window(20, 24), AggregateMode::Sum), None);
        assert_eq!(
            aggregate(&records, window(20, 24), AggregateMode::MeanOfDailySums),
            None
        );
    }

    #[test]
    fn mean_of_daily_sums_averages_day_totals_not_transactions() {
        // Three transactions on the 18th, one on the 19th. The mean of raw
        // amounts would be (10+20+30+100)/4 = 40; the mean of day totals is
        // (60+100)/2 = 80.
        let records = vec![rec(18, 10.0), rec(18, 20.0), rec(18, 30.0), rec(19, 100.0)];
        assert_eq!(
            aggregate(&records, window(18, 24), AggregateMode::MeanOfDailySums),
            Some(80.0)
        );
    }

    #[test]
    fn mean_of_daily_sums_divides_by_days_with_data_only() {
        // Only two of the seven window days have rows; the divisor is 2.
        let records = vec![rec(18, 100.0), rec(21, 200.0)];
        assert_eq!(
            aggregate(&records, window(18, 24), AggregateMode::MeanOfDailySums),
            Some(150.0)
        );
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let records = vec![rec(18, 1.0), rec(24, 2.0)];
        assert_eq!(
            aggregate(&records, window(18, 24), AggregateMode::Sum),
            Some(3.0)
        );
    }
}
