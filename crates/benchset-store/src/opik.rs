use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use benchset_core::config::Settings;
use benchset_core::record::DatasetRecord;

use crate::error::StoreError;
use crate::store::{DatasetHandle, DatasetStore};

const WORKSPACE_HEADER: HeaderName = HeaderName::from_static("comet-workspace");
const INSERT_BATCH_SIZE: usize = 1000;
const PAGE_SIZE: usize = 500;

/// Opik-backed [`DatasetStore`] using the REST API.
pub struct OpikStore {
    client: Client,
    base_url: String,
}

impl OpikStore {
    /// Build a client from settings.
    ///
    /// Fails when the credentials cannot be encoded as headers or the HTTP
    /// client cannot be constructed.
    pub fn new(settings: &Settings) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &settings.store_api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| StoreError::Config(format!("invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(workspace) = &settings.store_workspace {
            let value = HeaderValue::from_str(workspace)
                .map_err(|e| StoreError::Config(format!("invalid workspace: {e}")))?;
            headers.insert(WORKSPACE_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.store_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from the process environment.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(&Settings::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/private/{}", self.base_url, path)
    }

    async fn fetch_items_page(
        &self,
        dataset: &DatasetHandle,
        page: usize,
    ) -> Result<ItemsPage, StoreError> {
        let resp = self
            .client
            .get(self.url(&format!("datasets/{}/items", dataset.id)))
            .query(&[("page", page), ("size", PAGE_SIZE)])
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Opik list items error: {e}")))?;

        let resp = ensure_success(resp).await?;
        resp.json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Opik items page: {e}")))
    }
}

/// Map a non-success response to an error, keeping the body for diagnostics.
async fn ensure_success(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DatasetStore for OpikStore {
    async fn get_dataset(&self, name: &str) -> Result<Option<DatasetHandle>, StoreError> {
        let resp = self
            .client
            .post(self.url("datasets/retrieve"))
            .json(&RetrieveRequest { dataset_name: name })
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Opik retrieve error: {e}")))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let dataset: OpikDataset = ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Opik dataset: {e}")))?;
        Ok(Some(dataset.into()))
    }

    async fn create_dataset(&self, name: &str) -> Result<DatasetHandle, StoreError> {
        let resp = self
            .client
            .post(self.url("datasets"))
            .json(&CreateRequest {
                name,
                description: None,
            })
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Opik create error: {e}")))?;

        if resp.status() == StatusCode::CONFLICT {
            return Err(StoreError::Conflict(name.to_string()));
        }
        ensure_success(resp).await?;

        // Creation answers 201 without a body; read the new dataset back.
        self.get_dataset(name).await?.ok_or_else(|| {
            StoreError::InvalidResponse(format!("dataset {name} missing right after creation"))
        })
    }

    async fn insert_items(
        &self,
        dataset: &DatasetHandle,
        records: &[DatasetRecord],
    ) -> Result<(), StoreError> {
        for chunk in records.chunks(INSERT_BATCH_SIZE) {
            let body = InsertRequest {
                dataset_name: &dataset.name,
                items: chunk
                    .iter()
                    .map(|data| InsertItem {
                        data,
                        source: "sdk",
                    })
                    .collect(),
            };

            let resp = self
                .client
                .put(self.url("datasets/items"))
                .json(&body)
                .send()
                .await
                .map_err(|e| StoreError::Request(format!("Opik insert error: {e}")))?;
            ensure_success(resp).await?;
        }

        tracing::debug!(dataset = %dataset.name, count = records.len(), "inserted items");
        Ok(())
    }

    async fn get_items(&self, dataset: &DatasetHandle) -> Result<Vec<DatasetRecord>, StoreError> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_items_page(dataset, page).await?;
            let fetched = batch.content.len();
            items.extend(batch.content.into_iter().map(|item| item.data));

            let exhausted = match batch.total {
                Some(total) => items.len() >= total,
                None => fetched < PAGE_SIZE,
            };
            if fetched == 0 || exhausted {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

// ---------------------------------------------------------------------------
// Opik REST request/response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    dataset_name: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct InsertRequest<'a> {
    dataset_name: &'a str,
    items: Vec<InsertItem<'a>>,
}

#[derive(Debug, Serialize)]
struct InsertItem<'a> {
    data: &'a DatasetRecord,
    source: &'static str,
}

#[derive(Debug, Deserialize)]
struct OpikDataset {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<OpikDataset> for DatasetHandle {
    fn from(d: OpikDataset) -> Self {
        DatasetHandle {
            id: d.id,
            name: d.name,
            description: d.description,
            created_at: d.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    #[serde(default)]
    content: Vec<OpikItem>,
    #[serde(default)]
    total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct OpikItem {
    #[serde(default)]
    data: DatasetRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let settings = Settings::default().with_store_url("http://localhost:5173/api/");
        let store = OpikStore::new(&settings).unwrap();
        assert_eq!(store.base_url(), "http://localhost:5173/api");
        assert_eq!(
            store.url("datasets/retrieve"),
            "http://localhost:5173/api/v1/private/datasets/retrieve"
        );
    }

    #[test]
    fn credentials_become_headers() {
        let settings = Settings::default()
            .with_store_api_key("key-123")
            .with_store_workspace("team");
        assert!(OpikStore::new(&settings).is_ok());
    }

    #[test]
    fn invalid_header_value_is_config_error() {
        let settings = Settings::default().with_store_api_key("bad\nkey");
        let err = OpikStore::new(&settings).err().unwrap();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn serialize_insert_request() {
        let record = json!({"question": "q", "answer": "a"})
            .as_object()
            .cloned()
            .unwrap();
        let req = InsertRequest {
            dataset_name: "gsm8k_test",
            items: vec![InsertItem {
                data: &record,
                source: "sdk",
            }],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["dataset_name"], "gsm8k_test");
        assert_eq!(value["items"][0]["data"]["answer"], "a");
        assert_eq!(value["items"][0]["source"], "sdk");
    }

    #[test]
    fn create_request_omits_missing_description() {
        let value = serde_json::to_value(CreateRequest {
            name: "d",
            description: None,
        })
        .unwrap();
        assert_eq!(value, json!({"name": "d"}));
    }

    #[test]
    fn parse_dataset_response() {
        let body = r#"{"id":"0190-abc","name":"gsm8k","description":null,"created_at":"2024-05-01T10:00:00Z","dataset_items_count":300}"#;
        let handle: DatasetHandle = serde_json::from_str::<OpikDataset>(body).unwrap().into();
        assert_eq!(handle.id, "0190-abc");
        assert_eq!(handle.name, "gsm8k");
        assert!(handle.created_at.is_some());
    }

    #[test]
    fn parse_items_page() {
        let body = r#"{"content":[{"id":"1","data":{"question":"q1"}},{"id":"2","data":{"question":"q2"}}],"page":1,"size":500,"total":2}"#;
        let page: ItemsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.total, Some(2));
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[1].data["question"], "q2");
    }
}
