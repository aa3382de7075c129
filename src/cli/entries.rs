use super::ui;
use crate::core::{
    EntryType, FinanceBackend, FinanceRecord, SaveOutcome, add_or_update, validate_record,
};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use comfy_table::Cell;
use tracing::debug;

/// Entry as typed on the command line, before validation.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub entry_type: EntryType,
    pub date: Option<NaiveDate>,
    pub description: String,
}

/// Which entries `list` asks the backend for.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub entry_type: Option<EntryType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn start_of_day(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn end_of_day(date: NaiveDate) -> i64 {
    start_of_day(date) + 86_399
}

impl NewEntry {
    /// Converts to a backend record; the date defaults to now.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<FinanceRecord> {
        let date = self.date.map_or(now.timestamp(), start_of_day);
        validate_record(FinanceRecord {
            id: self.id,
            entry_type: self.entry_type,
            date,
            category: self.category,
            amount: self.amount,
            description: self.description,
        })
    }
}

pub async fn add(backend: &(dyn FinanceBackend + Send + Sync), entry: NewEntry) -> Result<()> {
    let record = entry.into_record(Utc::now())?;
    let outcome = add_or_update(backend, &record)
        .await
        .with_context(|| format!("Failed to save entry {}", record.id))?;

    let verb = match outcome {
        SaveOutcome::Created => "added",
        SaveOutcome::Updated => "updated",
    };
    println!(
        "{} {} entry {} ({})",
        ui::style_text("✓", ui::StyleType::Income),
        record.entry_type,
        verb,
        record.id
    );
    Ok(())
}

pub async fn delete(backend: &(dyn FinanceBackend + Send + Sync), id: &str) -> Result<()> {
    let record = backend.entry(id).await?;
    backend
        .delete_entry(id)
        .await
        .with_context(|| format!("Failed to delete entry {id}"))?;
    println!("{} entry deleted successfully", record.category);
    Ok(())
}

/// Fetches entries using the narrowest backend query the filter allows.
pub async fn fetch_filtered(
    backend: &(dyn FinanceBackend + Send + Sync),
    filter: &ListFilter,
) -> Result<Vec<FinanceRecord>> {
    let range = match (filter.from, filter.to) {
        (None, None) => None,
        (from, to) => {
            let start = from.map_or(i64::MIN, start_of_day);
            let end = to.map_or(i64::MAX, end_of_day);
            if start > end {
                bail!("--from must not be after --to");
            }
            Some((start, end))
        }
    };

    let records = match (filter.entry_type, range) {
        (None, None) => backend.all_entries().await?,
        (Some(entry_type), None) => backend.entries_by_type(entry_type).await?,
        (entry_type, Some((start, end))) => {
            let records = backend.entries_by_date_range(start, end).await?;
            match entry_type {
                Some(t) => records.into_iter().filter(|r| r.entry_type == t).collect(),
                None => records,
            }
        }
    };
    debug!("Fetched {} entries for {:?}", records.len(), filter);
    Ok(records)
}

pub fn render_list(records: &[FinanceRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No entries found".to_string();
    }

    let mut sorted: Vec<&FinanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("ID"),
        ui::header_cell("Type"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Description"),
    ]);
    for record in sorted {
        let date = record
            .timestamp()
            .map_or("N/A".to_string(), |ts| ts.format("%Y-%m-%d").to_string());
        table.add_row(vec![
            Cell::new(date),
            Cell::new(&record.id),
            Cell::new(record.entry_type),
            Cell::new(&record.category),
            ui::amount_cell(symbol, record.effective_amount()),
            Cell::new(&record.description),
        ]);
    }
    table.to_string()
}

pub async fn list(
    backend: &(dyn FinanceBackend + Send + Sync),
    filter: &ListFilter,
    symbol: &str,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching entries...");
    let records = fetch_filtered(backend, filter).await;
    pb.finish_and_clear();

    println!("{}", render_list(&records?, symbol));
    Ok(())
}
