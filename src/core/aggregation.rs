//! Groups finance records into per-period buckets for the dashboard.
use crate::core::entry::FinanceRecord;
use crate::core::period::Period;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A constituent record of an aggregated period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySummary {
    pub id: String,
    pub category: String,
    pub amount: f64,
}

/// All records falling into one calendar period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPeriod {
    /// Raw timestamp of the record that opened this bucket.
    pub date: DateTime<Utc>,
    /// Unrounded sum of the bucket's amounts.
    pub total: f64,
    /// Constituent records in input order.
    pub entries: Vec<EntrySummary>,
}

/// Groups `records` by `period` and returns the buckets newest first.
///
/// Records are not filtered by entry type; callers partition beforehand.
/// Records whose timestamp cannot be represented are skipped.
pub fn aggregate_by_period(records: &[FinanceRecord], period: Period) -> Vec<AggregatedPeriod> {
    let mut grouped: BTreeMap<String, AggregatedPeriod> = BTreeMap::new();

    for record in records {
        let Some(ts) = record.timestamp() else {
            warn!(id = %record.id, date = record.date, "Skipping record with invalid date");
            continue;
        };

        let amount = record.effective_amount();
        let bucket = grouped
            .entry(period.key(&ts))
            .or_insert_with(|| AggregatedPeriod {
                date: ts,
                total: 0.0,
                entries: Vec::new(),
            });
        bucket.total += amount;
        bucket.entries.push(EntrySummary {
            id: record.id.clone(),
            category: record.category.clone(),
            amount,
        });
    }

    let mut aggregated: Vec<AggregatedPeriod> = grouped.into_values().collect();
    aggregated.sort_by(|a, b| b.date.cmp(&a.date));
    debug!(
        "Aggregated {} records into {} {} buckets",
        records.len(),
        aggregated.len(),
        period
    );
    aggregated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::EntryType;
    use crate::core::entry::test_support::record;
    use chrono::TimeZone;

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_period(&[], Period::Daily).is_empty());
        assert!(aggregate_by_period(&[], Period::Monthly).is_empty());
        assert!(aggregate_by_period(&[], Period::Yearly).is_empty());
    }

    #[test]
    fn test_monthly_income_newest_first() {
        let records = vec![
            record("jan", EntryType::Income, (2024, 1, 15, 0), 100.0),
            record("feb", EntryType::Income, (2024, 2, 1, 0), 50.0),
        ];

        let result = aggregate_by_period(&records, Period::Monthly);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].total, 50.0);
        assert_eq!(result[0].entries[0].id, "feb");
        assert_eq!(result[1].total, 100.0);
        assert_eq!(result[1].entries[0].id, "jan");
    }

    #[test]
    fn test_bucket_keeps_input_order_and_first_date() {
        let records = vec![
            record("late", EntryType::Expense, (2024, 3, 20, 18), 10.0),
            record("early", EntryType::Expense, (2024, 3, 2, 8), 5.5),
            record("mid", EntryType::Expense, (2024, 3, 10, 12), 4.5),
        ];

        let result = aggregate_by_period(&records, Period::Monthly);

        assert_eq!(result.len(), 1);
        let bucket = &result[0];
        assert_eq!(bucket.date, Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap());
        assert_eq!(bucket.total, 20.0);
        let ids: Vec<_> = bucket.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early", "mid"]);
        assert_eq!(bucket.entries[1].category, "cat-early");
        assert_eq!(bucket.entries[1].amount, 5.5);
    }

    #[test]
    fn test_daily_and_yearly_grouping() {
        let records = vec![
            record("a", EntryType::Saving, (2023, 12, 31, 23), 1.0),
            record("b", EntryType::Saving, (2024, 1, 1, 0), 2.0),
            record("c", EntryType::Saving, (2024, 1, 1, 22), 3.0),
            record("d", EntryType::Saving, (2024, 6, 1, 9), 4.0),
        ];

        let daily = aggregate_by_period(&records, Period::Daily);
        let daily_totals: Vec<_> = daily.iter().map(|p| p.total).collect();
        assert_eq!(daily_totals, vec![4.0, 5.0, 1.0]);

        let yearly = aggregate_by_period(&records, Period::Yearly);
        let yearly_totals: Vec<_> = yearly.iter().map(|p| p.total).collect();
        assert_eq!(yearly_totals, vec![9.0, 1.0]);
    }

    #[test]
    fn test_totals_are_conserved_and_ids_partitioned() {
        let mut records = Vec::new();
        for i in 0..40u32 {
            let entry_type = match i % 3 {
                0 => EntryType::Income,
                1 => EntryType::Expense,
                _ => EntryType::Unknown,
            };
            records.push(record(
                &format!("r{i}"),
                entry_type,
                (2020 + (i % 4) as i32, 1 + i % 12, 1 + i % 28, i % 24),
                f64::from(i) * 1.25,
            ));
        }
        let expected: f64 = records.iter().map(|r| r.amount).sum();

        for period in [Period::Daily, Period::Monthly, Period::Yearly] {
            let result = aggregate_by_period(&records, period);
            let total: f64 = result.iter().map(|p| p.total).sum();
            assert!((total - expected).abs() < 1e-9, "{period}: {total} != {expected}");

            let mut ids: Vec<_> = result
                .iter()
                .flat_map(|p| p.entries.iter().map(|e| e.id.clone()))
                .collect();
            ids.sort();
            let mut expected_ids: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
            expected_ids.sort();
            assert_eq!(ids, expected_ids);

            assert!(result.windows(2).all(|w| w[0].date >= w[1].date));
        }
    }

    #[test]
    fn test_skips_invalid_dates_and_tolerates_odd_amounts() {
        let mut bad = record("bad", EntryType::Income, (2024, 1, 1, 0), 99.0);
        bad.date = i64::MIN;
        let mut nan = record("nan", EntryType::Income, (2024, 1, 2, 0), 0.0);
        nan.amount = f64::NAN;
        let records = vec![
            bad,
            nan,
            record("neg", EntryType::Income, (2024, 1, 3, 0), -10.0),
            record("zero", EntryType::Income, (2024, 1, 4, 0), 0.0),
        ];

        let result = aggregate_by_period(&records, Period::Monthly);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total, -10.0);
        assert_eq!(result[0].entries.len(), 3);
        assert_eq!(result[0].entries[0].amount, 0.0);
    }
}
