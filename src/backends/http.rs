use super::util::send_with_retry;
use crate::core::backend::{BackendError, FinanceBackend};
use crate::core::entry::{EntryType, FinanceRecord};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

const READ_RETRIES: usize = 3;
const RETRY_DELAY_MS: u64 = 500;

/// Talks to the finance service over its JSON HTTP interface.
pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    fn entries_url(&self) -> Result<Url> {
        Url::parse(&format!("{}/entries", self.base_url))
            .with_context(|| format!("Invalid backend URL: {}", self.base_url))
    }

    /// `{base}/entries/{id}` with the id percent-encoded as one path segment.
    fn entry_url(&self, id: &str) -> Result<Url> {
        let mut url = self.entries_url()?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Backend URL cannot take a path: {}", self.base_url))?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url, id: Option<&str>) -> Result<T> {
        debug!("GET {}", url);
        let response = send_with_retry(
            || self.authorize(self.client.get(url.clone())).send(),
            READ_RETRIES,
            RETRY_DELAY_MS,
        )
        .await
        .context("Backend request failed")?;
        let response = check_status(response, id, Request::Other).await?;

        let response_text = response
            .text()
            .await
            .context("Failed to get response text")?;

        match serde_json::from_str(&response_text) {
            Ok(data) => Ok(data),
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse backend response"
                );
                Err(e).context("Failed to parse backend response")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Create,
    Other,
}

/// Maps unsuccessful responses to a [`BackendError`].
///
/// Only a create may report a duplicate id through its message instead of a 409.
async fn check_status(
    response: Response,
    id: Option<&str>,
    request: Request,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    let id = id.unwrap_or_default().to_string();
    let duplicate_message = request == Request::Create && message.contains("already exists");
    let err = if status == StatusCode::CONFLICT || duplicate_message {
        BackendError::AlreadyExists(id)
    } else if status == StatusCode::NOT_FOUND {
        BackendError::NotFound(id)
    } else {
        BackendError::Rejected {
            status: status.as_u16(),
            message,
        }
    };
    debug!("Backend returned {}: {}", status, err);
    Err(err.into())
}

#[async_trait]
impl FinanceBackend for HttpBackend {
    async fn all_entries(&self) -> Result<Vec<FinanceRecord>> {
        self.fetch(self.entries_url()?, None).await
    }

    async fn entry(&self, id: &str) -> Result<FinanceRecord> {
        self.fetch(self.entry_url(id)?, Some(id)).await
    }

    async fn entries_by_type(&self, entry_type: EntryType) -> Result<Vec<FinanceRecord>> {
        let mut url = self.entries_url()?;
        url.query_pairs_mut().append_pair("type", &entry_type.to_string());
        self.fetch(url, None).await
    }

    async fn entries_by_date_range(&self, start: i64, end: i64) -> Result<Vec<FinanceRecord>> {
        let mut url = self.entries_url()?;
        url.query_pairs_mut()
            .append_pair("start", &start.to_string())
            .append_pair("end", &end.to_string());
        self.fetch(url, None).await
    }

    async fn add_entry(&self, record: &FinanceRecord) -> Result<()> {
        let url = self.entries_url()?;
        debug!(id = %record.id, "POST {}", url);
        let response = self
            .authorize(self.client.post(url))
            .json(record)
            .send()
            .await
            .context("Failed to add entry")?;
        check_status(response, Some(&record.id), Request::Create).await?;
        Ok(())
    }

    async fn update_entry(&self, record: &FinanceRecord) -> Result<()> {
        let url = self.entry_url(&record.id)?;
        debug!(id = %record.id, "PUT {}", url);
        let response = self
            .authorize(self.client.put(url))
            .json(record)
            .send()
            .await
            .context("Failed to update entry")?;
        check_status(response, Some(&record.id), Request::Other).await?;
        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<()> {
        let url = self.entry_url(id)?;
        debug!(id, "DELETE {}", url);
        let response = self
            .authorize(self.client.delete(url))
            .send()
            .await
            .context("Failed to delete entry")?;
        check_status(response, Some(id), Request::Other).await?;
        Ok(())
    }
}
