//! Calendar granularities used to bucket records.
//!
//! All timestamps are interpreted in UTC so that the same record always lands
//! in the same bucket regardless of where the client runs.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    #[default]
    Monthly,
    Yearly,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Period::Daily => "daily",
                Period::Monthly => "monthly",
                Period::Yearly => "yearly",
            }
        )
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Period::Daily),
            "monthly" | "month" => Ok(Period::Monthly),
            "yearly" | "year" => Ok(Period::Yearly),
            _ => Err(anyhow::anyhow!("Invalid period: {}", s)),
        }
    }
}

impl Period {
    /// Bucket identity for `ts`: `yyyy-MM-dd`, `yyyy-MM` or `yyyy`.
    pub fn key(&self, ts: &DateTime<Utc>) -> String {
        let fmt = match self {
            Period::Daily => "%Y-%m-%d",
            Period::Monthly => "%Y-%m",
            Period::Yearly => "%Y",
        };
        ts.format(fmt).to_string()
    }

    /// First instant of the period containing `ts`.
    pub fn start(&self, ts: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = ts.date_naive();
        let first_day = match self {
            Period::Daily => Some(date),
            Period::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
            Period::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }?;
        first_day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
    }

    /// Short label for chart axes, e.g. `Jan 15`, `Jan 2024`, `2024`.
    pub fn chart_label(&self, ts: &DateTime<Utc>) -> String {
        let fmt = match self {
            Period::Daily => "%b %d",
            Period::Monthly => "%b %Y",
            Period::Yearly => "%Y",
        };
        ts.format(fmt).to_string()
    }

    /// Heading for a dashboard section row, e.g. `Jan 15, 2024`, `January 2024`.
    pub fn section_label(&self, ts: &DateTime<Utc>) -> String {
        let fmt = match self {
            Period::Daily => "%b %d, %Y",
            Period::Monthly => "%B %Y",
            Period::Yearly => "%Y",
        };
        ts.format(fmt).to_string()
    }
}
