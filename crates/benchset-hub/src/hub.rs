use async_trait::async_trait;

use benchset_core::record::DatasetRecord;

use crate::error::HubError;

/// Largest page the datasets-server rows API hands out.
pub const MAX_PAGE_ROWS: usize = 100;

/// One split of one configuration of a hub dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HubSplit {
    pub dataset: String,
    pub config: String,
    pub split: String,
}

impl HubSplit {
    pub fn new(
        dataset: impl Into<String>,
        config: impl Into<String>,
        split: impl Into<String>,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            config: config.into(),
            split: split.into(),
        }
    }
}

impl std::fmt::Display for HubSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.dataset, self.config, self.split)
    }
}

/// A window of rows plus the split size, when the hub reports it.
#[derive(Debug, Clone, Default)]
pub struct RowPage {
    pub rows: Vec<DatasetRecord>,
    pub total: Option<usize>,
}

/// Paged row access to public benchmark datasets.
#[async_trait]
pub trait DatasetHub: Send + Sync {
    /// Fetch up to `length` rows starting at `offset`.
    async fn fetch_rows(
        &self,
        split: &HubSplit,
        offset: usize,
        length: usize,
    ) -> Result<RowPage, HubError>;
}

/// Stream rows from the start of a split, stopping after `n`.
///
/// Returns fewer than `n` rows when the split is shorter.
pub async fn take_rows<H>(hub: &H, split: &HubSplit, n: usize) -> Result<Vec<DatasetRecord>, HubError>
where
    H: DatasetHub + ?Sized,
{
    let mut rows = Vec::with_capacity(n.min(1024));
    let mut offset = 0;

    while rows.len() < n {
        let length = MAX_PAGE_ROWS.min(n - rows.len());
        let page = hub.fetch_rows(split, offset, length).await?;
        let fetched = page.rows.len();
        if fetched == 0 {
            break;
        }

        rows.extend(page.rows.into_iter().take(n - rows.len()));
        offset += fetched;

        let exhausted = match page.total {
            Some(total) => offset >= total,
            None => fetched < length,
        };
        if exhausted {
            break;
        }
    }

    Ok(rows)
}

/// Fetch exactly the first `n` rows of a split.
///
/// Fails with [`HubError::NotEnoughRows`] when the split is shorter than `n`.
pub async fn select_rows<H>(hub: &H, split: &HubSplit, n: usize) -> Result<Vec<DatasetRecord>, HubError>
where
    H: DatasetHub + ?Sized,
{
    let rows = take_rows(hub, split, n).await?;
    if rows.len() < n {
        return Err(HubError::NotEnoughRows {
            requested: n,
            available: rows.len(),
        });
    }
    Ok(rows)
}

/// Materialize a whole split.
pub async fn fetch_all_rows<H>(hub: &H, split: &HubSplit) -> Result<Vec<DatasetRecord>, HubError>
where
    H: DatasetHub + ?Sized,
{
    take_rows(hub, split, usize::MAX).await
}
