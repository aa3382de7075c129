//! Builds the income/expense/saving comparison series for charts.
use crate::core::entry::{EntryType, FinanceRecord};
use crate::core::period::Period;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Most recent periods kept in a chart series.
pub const MAX_CHART_POINTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub period: String,
    pub income: f64,
    pub expense: f64,
    pub saving: f64,
}

struct Bucket {
    start: DateTime<Utc>,
    income: f64,
    expense: f64,
    saving: f64,
}

/// Rounds to two decimals, ties away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Groups `records` by `period` and entry type.
///
/// Output is oldest first and holds at most [`MAX_CHART_POINTS`] points,
/// the most recent ones.
pub fn format_chart_data(records: &[FinanceRecord], period: Period) -> Vec<ChartPoint> {
    let mut grouped: BTreeMap<String, Bucket> = BTreeMap::new();

    for record in records {
        let Some(start) = record.timestamp().and_then(|ts| period.start(&ts)) else {
            warn!(id = %record.id, date = record.date, "Skipping record with invalid date");
            continue;
        };

        let bucket = grouped.entry(period.key(&start)).or_insert(Bucket {
            start,
            income: 0.0,
            expense: 0.0,
            saving: 0.0,
        });
        let amount = record.effective_amount();
        match record.entry_type {
            EntryType::Income => bucket.income += amount,
            EntryType::Expense => bucket.expense += amount,
            EntryType::Saving => bucket.saving += amount,
            EntryType::Unknown => {
                debug!(id = %record.id, "Ignoring record with unknown entry type");
            }
        }
    }

    let mut buckets: Vec<Bucket> = grouped.into_values().collect();
    buckets.sort_by_key(|b| b.start);
    let skip = buckets.len().saturating_sub(MAX_CHART_POINTS);

    buckets
        .into_iter()
        .skip(skip)
        .map(|b| ChartPoint {
            period: period.chart_label(&b.start),
            income: round_to_cents(b.income),
            expense: round_to_cents(b.expense),
            saving: round_to_cents(b.saving),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::test_support::record;

    #[test]
    fn test_empty_input() {
        assert!(format_chart_data(&[], Period::Monthly).is_empty());
    }

    #[test]
    fn test_monthly_comparison() {
        let records = vec![
            record("a", EntryType::Income, (2024, 1, 15, 0), 100.0),
            record("b", EntryType::Expense, (2024, 1, 20, 0), 40.0),
            record("c", EntryType::Income, (2024, 2, 1, 0), 50.0),
        ];

        let points = format_chart_data(&records, Period::Monthly);

        assert_eq!(
            points,
            vec![
                ChartPoint {
                    period: "Jan 2024".to_string(),
                    income: 100.0,
                    expense: 40.0,
                    saving: 0.0,
                },
                ChartPoint {
                    period: "Feb 2024".to_string(),
                    income: 50.0,
                    expense: 0.0,
                    saving: 0.0,
                },
            ]
        );
    }

    #[test]
    fn test_oldest_first_regardless_of_input_order() {
        let records = vec![
            record("c", EntryType::Saving, (2024, 3, 9, 10), 3.0),
            record("a", EntryType::Saving, (2024, 3, 1, 10), 1.0),
            record("b", EntryType::Expense, (2024, 3, 5, 10), 2.0),
        ];

        let points = format_chart_data(&records, Period::Daily);

        let labels: Vec<_> = points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(labels, vec!["Mar 01", "Mar 05", "Mar 09"]);
        assert_eq!(points[1].expense, 2.0);
        assert_eq!(points[1].saving, 0.0);
    }

    #[test]
    fn test_keeps_ten_most_recent_periods() {
        let records: Vec<_> = (0..50)
            .map(|i| {
                let year = 2020 + i / 12;
                let month = (i % 12) as u32 + 1;
                record(&format!("m{i}"), EntryType::Income, (year, month, 3, 0), 1.0)
            })
            .collect();

        let points = format_chart_data(&records, Period::Monthly);

        assert_eq!(points.len(), MAX_CHART_POINTS);
        assert_eq!(points.first().unwrap().period, "May 2023");
        assert_eq!(points.last().unwrap().period, "Feb 2024");
    }

    #[test]
    fn test_rounding_to_cents() {
        let records = vec![
            record("a", EntryType::Income, (2024, 5, 1, 0), 10.005),
            record("b", EntryType::Income, (2024, 5, 2, 0), 10.005),
            record("c", EntryType::Income, (2024, 5, 3, 0), 0.0),
        ];

        let points = format_chart_data(&records, Period::Monthly);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].income, 20.01);
    }

    #[test]
    fn test_round_to_cents_ties_away_from_zero() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(2.0), 2.0);
    }

    #[test]
    fn test_unknown_type_opens_bucket_without_totals() {
        let records = vec![record("u", EntryType::Unknown, (2021, 7, 4, 0), 12.0)];

        let points = format_chart_data(&records, Period::Yearly);

        assert_eq!(
            points,
            vec![ChartPoint {
                period: "2021".to_string(),
                income: 0.0,
                expense: 0.0,
                saving: 0.0,
            }]
        );
    }

    #[test]
    fn test_skips_invalid_dates() {
        let mut bad = record("bad", EntryType::Income, (2024, 1, 1, 0), 5.0);
        bad.date = i64::MAX;
        let records = vec![bad, record("ok", EntryType::Expense, (2024, 1, 1, 0), 7.0)];

        let points = format_chart_data(&records, Period::Yearly);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].income, 0.0);
        assert_eq!(points[0].expense, 7.0);
    }
}
