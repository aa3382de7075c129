//! Abstraction over the service that owns finance records.

use crate::core::entry::{EntryType, FinanceRecord};
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Failures reported by a backend that callers may want to react to.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Entry with id {0} already exists")]
    AlreadyExists(String),
    #[error("Entry with id {0} not found")]
    NotFound(String),
    #[error("Backend is read-only")]
    ReadOnly,
    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait FinanceBackend: Send + Sync {
    async fn all_entries(&self) -> Result<Vec<FinanceRecord>>;

    async fn entry(&self, id: &str) -> Result<FinanceRecord>;

    async fn entries_by_type(&self, entry_type: EntryType) -> Result<Vec<FinanceRecord>>;

    /// Entries dated within `start..=end`, both in epoch seconds.
    async fn entries_by_date_range(&self, start: i64, end: i64) -> Result<Vec<FinanceRecord>>;

    async fn add_entry(&self, record: &FinanceRecord) -> Result<()>;

    async fn update_entry(&self, record: &FinanceRecord) -> Result<()>;

    async fn delete_entry(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Creates `record`, or updates it when an entry with the same id exists.
pub async fn add_or_update(
    backend: &(dyn FinanceBackend + Send + Sync),
    record: &FinanceRecord,
) -> Result<SaveOutcome> {
    match backend.add_entry(record).await {
        Ok(()) => Ok(SaveOutcome::Created),
        Err(e)
            if matches!(
                e.downcast_ref::<BackendError>(),
                Some(BackendError::AlreadyExists(_))
            ) =>
        {
            debug!(id = %record.id, "Entry exists, updating instead");
            backend.update_entry(record).await?;
            Ok(SaveOutcome::Updated)
        }
        Err(e) => Err(e),
    }
}

/// Trims text fields and checks the record is fit to submit.
pub fn validate_record(mut record: FinanceRecord) -> Result<FinanceRecord> {
    record.id = record.id.trim().to_string();
    record.category = record.category.trim().to_string();
    record.description = record.description.trim().to_string();

    let mut problems = Vec::new();
    if record.id.is_empty() {
        problems.push("Entry ID is required");
    }
    if !record.amount.is_finite() || record.amount <= 0.0 {
        problems.push("Amount must be a positive number");
    }
    if record.category.is_empty() {
        problems.push("Category is required");
    }
    if record.entry_type == EntryType::Unknown {
        problems.push("Entry type must be income, expense or saving");
    }

    if problems.is_empty() {
        Ok(record)
    } else {
        Err(anyhow::anyhow!("Invalid entry: {}", problems.join("; ")))
    }
}
