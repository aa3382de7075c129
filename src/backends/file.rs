use crate::core::backend::{BackendError, FinanceBackend};
use crate::core::entry::{EntryType, FinanceRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only view over entries exported to a JSON or YAML file.
///
/// The file is re-read on every query so edits show up without a restart.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn is_yaml(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        )
    }

    async fn load(&self) -> Result<Vec<FinanceRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read entries file: {}", self.path.display()))?;

        let entries: Vec<FinanceRecord> = if self.is_yaml() {
            serde_yaml::from_str(&content).with_context(|| {
                format!("Failed to parse entries file: {}", self.path.display())
            })?
        } else {
            serde_json::from_str(&content).with_context(|| {
                format!("Failed to parse entries file: {}", self.path.display())
            })?
        };
        debug!("Loaded {} entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    async fn filtered(&self, keep: impl Fn(&FinanceRecord) -> bool) -> Result<Vec<FinanceRecord>> {
        Ok(self.load().await?.into_iter().filter(|r| keep(r)).collect())
    }
}

#[async_trait]
impl FinanceBackend for FileBackend {
    async fn all_entries(&self) -> Result<Vec<FinanceRecord>> {
        self.load().await
    }

    async fn entry(&self, id: &str) -> Result<FinanceRecord> {
        self.load()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()).into())
    }

    async fn entries_by_type(&self, entry_type: EntryType) -> Result<Vec<FinanceRecord>> {
        self.filtered(|r| r.entry_type == entry_type).await
    }

    async fn entries_by_date_range(&self, start: i64, end: i64) -> Result<Vec<FinanceRecord>> {
        self.filtered(|r| (start..=end).contains(&r.date)).await
    }

    async fn add_entry(&self, _record: &FinanceRecord) -> Result<()> {
        Err(BackendError::ReadOnly.into())
    }

    async fn update_entry(&self, _record: &FinanceRecord) -> Result<()> {
        Err(BackendError::ReadOnly.into())
    }

    async fn delete_entry(&self, _id: &str) -> Result<()> {
        Err(BackendError::ReadOnly.into())
    }
}
