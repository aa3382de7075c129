//! Finance records as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
    Saving,
    /// Anything the backend sends that is not one of the known types.
    #[serde(other)]
    Unknown,
}

impl Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EntryType::Income => "income",
                EntryType::Expense => "expense",
                EntryType::Saving => "saving",
                EntryType::Unknown => "unknown",
            }
        )
    }
}

impl FromStr for EntryType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            "saving" => Ok(EntryType::Saving),
            _ => Err(anyhow::anyhow!("Invalid entry type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
    pub id: String,
    pub entry_type: EntryType,
    /// Seconds since the Unix epoch.
    pub date: i64,
    pub category: String,
    /// Non-numeric amounts on the wire decode as NaN.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => value,
        RawAmount::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        RawAmount::Other(_) => f64::NAN,
    })
}

impl FinanceRecord {
    /// Returns the record's instant, or `None` when `date` is out of range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// Amount used for totals. Non-finite amounts count as zero.
    pub fn effective_amount(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }
}

/// Records split by entry type, in input order.
#[derive(Debug, Default, Clone)]
pub struct EntryPartition {
    pub income: Vec<FinanceRecord>,
    pub expense: Vec<FinanceRecord>,
    pub saving: Vec<FinanceRecord>,
}

pub fn partition_by_type(records: &[FinanceRecord]) -> EntryPartition {
    let mut partition = EntryPartition::default();
    for record in records {
        match record.entry_type {
            EntryType::Income => partition.income.push(record.clone()),
            EntryType::Expense => partition.expense.push(record.clone()),
            EntryType::Saving => partition.saving.push(record.clone()),
            EntryType::Unknown => {}
        }
    }
    partition
}
