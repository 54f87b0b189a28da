use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use benchset_core::record::DatasetRecord;

use crate::error::HubError;
use crate::hub::{DatasetHub, HubSplit, RowPage};
use crate::tabular::TabularFetch;

/// In-memory hub and table source, for offline runs and tests.
///
/// Counts every request so callers can assert whether a source was touched.
#[derive(Default)]
pub struct StaticHub {
    splits: HashMap<HubSplit, Vec<DatasetRecord>>,
    tables: HashMap<String, Vec<DatasetRecord>>,
    row_requests: AtomicUsize,
    table_requests: AtomicUsize,
}

impl StaticHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split(mut self, split: HubSplit, rows: Vec<DatasetRecord>) -> Self {
        self.splits.insert(split, rows);
        self
    }

    pub fn with_table(mut self, uri: impl Into<String>, rows: Vec<DatasetRecord>) -> Self {
        self.tables.insert(uri.into(), rows);
        self
    }

    pub fn row_requests(&self) -> usize {
        self.row_requests.load(Ordering::SeqCst)
    }

    pub fn table_requests(&self) -> usize {
        self.table_requests.load(Ordering::SeqCst)
    }

    /// Total number of requests of any kind.
    pub fn requests(&self) -> usize {
        self.row_requests() + self.table_requests()
    }
}

#[async_trait]
impl DatasetHub for StaticHub {
    async fn fetch_rows(
        &self,
        split: &HubSplit,
        offset: usize,
        length: usize,
    ) -> Result<RowPage, HubError> {
        self.row_requests.fetch_add(1, Ordering::SeqCst);
        let rows = self.splits.get(split).ok_or_else(|| HubError::Http {
            status: 404,
            body: format!("split {split} not found"),
        })?;

        let page = rows.iter().skip(offset).take(length).cloned().collect();
        Ok(RowPage {
            rows: page,
            total: Some(rows.len()),
        })
    }
}

#[async_trait]
impl TabularFetch for StaticHub {
    async fn fetch_table(&self, uri: &str) -> Result<Vec<DatasetRecord>, HubError> {
        self.table_requests.fetch_add(1, Ordering::SeqCst);
        self.tables.get(uri).cloned().ok_or_else(|| HubError::Http {
            status: 404,
            body: format!("table {uri} not found"),
        })
    }
}
