//! Per-dataset loaders.
//!
//! Each loader fetches raw rows from one source and reshapes them into the
//! record layout the evaluation metrics for that dataset expect.

mod bundled;
mod halu_eval;
mod hub;
mod truthful_qa;

use std::sync::Arc;

use benchset_core::catalog::DatasetName;
use benchset_core::config::Settings;
use benchset_core::record::DatasetRecord;
use benchset_hub::assets::{AssetBundle, DirAssets};
use benchset_hub::error::HubError;
use benchset_hub::hf::HfHub;
use benchset_hub::hub::DatasetHub;
use benchset_hub::tabular::TabularFetch;

use crate::error::SourceError;
use hub::HubDataset;

pub use bundled::HOTPOT_ASSET;
pub use halu_eval::HALU_EVAL_URI;

/// Where raw data comes from.
#[derive(Clone)]
pub struct Sources {
    pub hub: Arc<dyn DatasetHub>,
    pub tables: Arc<dyn TabularFetch>,
    pub assets: Arc<dyn AssetBundle>,
}

impl Sources {
    pub fn new(
        hub: Arc<dyn DatasetHub>,
        tables: Arc<dyn TabularFetch>,
        assets: Arc<dyn AssetBundle>,
    ) -> Self {
        Self { hub, tables, assets }
    }

    /// Hugging Face for rows and tables, a directory for assets.
    pub fn from_settings(settings: &Settings) -> Result<Self, HubError> {
        let hf = Arc::new(HfHub::new(settings)?);
        Ok(Self {
            hub: hf.clone(),
            tables: hf,
            assets: Arc::new(DirAssets::new(settings.asset_dir.clone())),
        })
    }
}

/// Fetch and normalize the records for one catalog entry.
///
/// `seed` only affects datasets where [`DatasetName::honors_seed`] is true.
pub async fn load_raw(
    sources: &Sources,
    name: DatasetName,
    test_mode: bool,
    seed: u64,
) -> Result<Vec<DatasetRecord>, SourceError> {
    let size = name.sample_size(test_mode);
    tracing::debug!(dataset = %name, size, test_mode, "loading source data");

    let dataset = match name {
        DatasetName::Hotpot300 | DatasetName::Hotpot500 => {
            return bundled::load_hotpot(sources.assets.as_ref(), name, size, seed);
        }
        DatasetName::TinyTest => return Ok(bundled::tiny_test()),
        DatasetName::HaluEval300 => {
            return halu_eval::load(sources.tables.as_ref(), name, size, seed).await;
        }
        DatasetName::TruthfulQa => {
            return truthful_qa::load(sources.hub.as_ref(), name, size).await;
        }
        DatasetName::Gsm8k => HubDataset::Gsm8k,
        DatasetName::HotpotQa => HubDataset::HotpotQa,
        DatasetName::Ai2Arc => HubDataset::Ai2Arc,
        DatasetName::CnnDailymail => HubDataset::CnnDailymail,
        DatasetName::RagbenchSentenceRelevance => HubDataset::RagbenchSentenceRelevance,
        DatasetName::ElectionQuestions => HubDataset::ElectionQuestions,
        DatasetName::Medhallu => HubDataset::Medhallu,
        DatasetName::RagHallucinations => HubDataset::RagHallucinations,
    };
    hub::load(sources.hub.as_ref(), dataset, size).await
}

fn unavailable(dataset: DatasetName) -> impl FnOnce(HubError) -> SourceError {
    move |source| SourceError::Unavailable { dataset, source }
}
