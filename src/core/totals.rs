use crate::core::entry::{EntryType, FinanceRecord};
use serde::Serialize;

/// Overall sums per entry type, shown in the dashboard header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct TypeTotals {
    pub income: f64,
    pub expense: f64,
    pub saving: f64,
}

impl TypeTotals {
    pub fn from_records(records: &[FinanceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut totals, record| {
            let amount = record.effective_amount();
            match record.entry_type {
                EntryType::Income => totals.income += amount,
                EntryType::Expense => totals.expense += amount,
                EntryType::Saving => totals.saving += amount,
                EntryType::Unknown => {}
            }
            totals
        })
    }

    /// Income left after expenses and savings.
    pub fn net_balance(&self) -> f64 {
        self.income - self.expense - self.saving
    }
}
