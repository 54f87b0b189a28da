//! Hugging Face hub client.
//!
//! Rows come from the datasets-server `/rows` endpoint; whole tables are
//! downloaded as parquet from `hf://datasets/<org>/<repo>/<path>` URIs.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use benchset_core::config::Settings;
use benchset_core::record::DatasetRecord;

use crate::error::HubError;
use crate::hub::{DatasetHub, HubSplit, MAX_PAGE_ROWS, RowPage};
use crate::retry::with_retry;
use crate::tabular::{TabularFetch, decode_parquet};

const MAX_RETRIES: u32 = 3;

pub struct HfHub {
    client: Client,
    rows_url: String,
    files_url: String,
    token: Option<String>,
}

impl HfHub {
    pub fn new(settings: &Settings) -> Result<Self, HubError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| HubError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rows_url: settings.hub_rows_url.trim_end_matches('/').to_string(),
            files_url: settings.hub_files_url.trim_end_matches('/').to_string(),
            token: settings.hub_token.clone(),
        })
    }

    pub fn from_env() -> Result<Self, HubError> {
        Self::new(&Settings::from_env())
    }

    /// Translate an `hf://datasets/...` URI to a download URL.
    ///
    /// Plain `http(s)` URLs pass through unchanged.
    pub fn resolve_uri(&self, uri: &str) -> Result<String, HubError> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return Ok(uri.to_string());
        }

        let rest = uri
            .strip_prefix("hf://datasets/")
            .ok_or_else(|| HubError::UnsupportedUri(uri.to_string()))?;
        let mut parts = rest.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(org), Some(repo), Some(path))
                if !org.is_empty() && !repo.is_empty() && !path.is_empty() =>
            {
                Ok(format!(
                    "{}/datasets/{org}/{repo}/resolve/main/{path}",
                    self.files_url
                ))
            }
            _ => Err(HubError::UnsupportedUri(uri.to_string())),
        }
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn rows_once(
        &self,
        split: &HubSplit,
        offset: usize,
        length: usize,
    ) -> Result<RowPage, HubError> {
        let offset = offset.to_string();
        let length = length.to_string();
        let req = self.client.get(format!("{}/rows", self.rows_url)).query(&[
            ("dataset", split.dataset.as_str()),
            ("config", split.config.as_str()),
            ("split", split.split.as_str()),
            ("offset", offset.as_str()),
            ("length", length.as_str()),
        ]);

        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| HubError::Request(format!("rows request for {split}: {e}")))?;
        let body: RowsResponse = ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| HubError::InvalidResponse(format!("rows for {split}: {e}")))?;

        body.into_page(split)
    }

    async fn download(&self, url: &str) -> Result<reqwest::Response, HubError> {
        let resp = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| HubError::Request(format!("download {url}: {e}")))?;
        ensure_success(resp).await
    }
}

async fn ensure_success(resp: Response) -> Result<Response, HubError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(HubError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DatasetHub for HfHub {
    async fn fetch_rows(
        &self,
        split: &HubSplit,
        offset: usize,
        length: usize,
    ) -> Result<RowPage, HubError> {
        let length = length.min(MAX_PAGE_ROWS);
        with_retry(MAX_RETRIES, HubError::is_transient, || {
            self.rows_once(split, offset, length)
        })
        .await
    }
}

#[async_trait]
impl TabularFetch for HfHub {
    async fn fetch_table(&self, uri: &str) -> Result<Vec<DatasetRecord>, HubError> {
        let url = self.resolve_uri(uri)?;
        let bytes = with_retry(MAX_RETRIES, HubError::is_transient, || async {
            self.download(&url)
                .await?
                .bytes()
                .await
                .map_err(|e| HubError::Request(format!("download {url}: {e}")))
        })
        .await?;

        tracing::debug!(%uri, bytes = bytes.len(), "downloaded table");
        decode_parquet(bytes)
    }
}

// ---------------------------------------------------------------------------
// datasets-server response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RowsResponse {
    #[serde(default)]
    rows: Vec<RowEntry>,
    #[serde(default)]
    num_rows_total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    #[serde(default)]
    row_idx: Option<usize>,
    row: DatasetRecord,
    /// Cells the server cut short; their values are prefixes, not data.
    #[serde(default)]
    truncated_cells: Vec<String>,
}

impl RowsResponse {
    fn into_page(self, split: &HubSplit) -> Result<RowPage, HubError> {
        if let Some(entry) = self.rows.iter().find(|e| !e.truncated_cells.is_empty()) {
            let idx = entry
                .row_idx
                .map_or_else(|| "?".to_string(), |i| i.to_string());
            return Err(HubError::InvalidResponse(format!(
                "truncated cells [{}] in row {idx} of {split}",
                entry.truncated_cells.join(", ")
            )));
        }
        Ok(RowPage {
            rows: self.rows.into_iter().map(|entry| entry.row).collect(),
            total: self.num_rows_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> HfHub {
        HfHub::new(&Settings::default().with_hub_files_url("https://huggingface.co/")).unwrap()
    }

    #[test]
    fn resolve_hf_uri() {
        let url = hub()
            .resolve_uri("hf://datasets/pminervini/HaluEval/general/data-00000-of-00001.parquet")
            .unwrap();
        assert_eq!(
            url,
            "https://huggingface.co/datasets/pminervini/HaluEval/resolve/main/general/data-00000-of-00001.parquet"
        );
    }

    #[test]
    fn resolve_passes_http_through() {
        let url = hub().resolve_uri("https://example.com/t.parquet").unwrap();
        assert_eq!(url, "https://example.com/t.parquet");
    }

    #[test]
    fn resolve_rejects_malformed_uris() {
        let hub = hub();
        assert!(matches!(
            hub.resolve_uri("s3://bucket/t.parquet"),
            Err(HubError::UnsupportedUri(_))
        ));
        assert!(hub.resolve_uri("hf://datasets/only-org").is_err());
        assert!(hub.resolve_uri("hf://datasets/org/repo/").is_err());
    }

    #[test]
    fn parse_rows_response() {
        let body = r#"{
            "features": [{"feature_idx": 0, "name": "question", "type": {"dtype": "string"}}],
            "rows": [
                {"row_idx": 0, "row": {"question": "q0", "answer": "a0"}, "truncated_cells": []},
                {"row_idx": 1, "row": {"question": "q1", "answer": "a1"}, "truncated_cells": []}
            ],
            "num_rows_total": 7473,
            "num_rows_per_page": 100,
            "partial": false
        }"#;
        let parsed: RowsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.num_rows_total, Some(7473));
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].row["answer"], "a1");

        let page = parsed.into_page(&HubSplit::new("gsm8k", "main", "train")).unwrap();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.total, Some(7473));
    }

    #[test]
    fn truncated_row_is_rejected() {
        let body = r#"{
            "rows": [
                {"row_idx": 0, "row": {"article": "full text", "highlights": "h"}, "truncated_cells": []},
                {"row_idx": 1, "row": {"article": "Lorem ips", "highlights": "h"}, "truncated_cells": ["article"]}
            ],
            "num_rows_total": 2
        }"#;
        let parsed: RowsResponse = serde_json::from_str(body).unwrap();
        let split = HubSplit::new("cnn_dailymail", "3.0.0", "validation");

        let err = parsed.into_page(&split).unwrap_err();
        assert!(matches!(err, HubError::InvalidResponse(_)));
        assert!(!err.is_transient());
        let text = err.to_string();
        assert!(text.contains("article"));
        assert!(text.contains("row 1"));
        assert!(text.contains("cnn_dailymail/3.0.0/validation"));
    }
}
