use serde_json::json;

use benchset_core::catalog::{DEFAULT_SEED, DatasetName};
use benchset_core::record::DatasetRecord;
use benchset_hub::assets::AssetBundle;

use super::unavailable;
use crate::error::SourceError;

/// Asset backing both hotpot catalog entries.
pub const HOTPOT_ASSET: &str = "hotpot-500.json";

/// First `size` rows of the hotpot asset, in reverse order.
///
/// Not a random sample: the seed is reported and dropped.
pub(super) fn load_hotpot(
    assets: &dyn AssetBundle,
    name: DatasetName,
    size: usize,
    seed: u64,
) -> Result<Vec<DatasetRecord>, SourceError> {
    if seed != DEFAULT_SEED {
        tracing::warn!("Seed parameter is currently not supported for the {name} dataset");
    }

    let mut rows = assets
        .read_records(HOTPOT_ASSET)
        .map_err(unavailable(name))?;
    rows.truncate(size);
    rows.reverse();
    Ok(rows)
}

pub(super) fn tiny_test() -> Vec<DatasetRecord> {
    [
        (
            "What is the capital of France?",
            "Paris",
            "France is a country in Europe. Its capital is Paris.",
        ),
        (
            "Who wrote Romeo and Juliet?",
            "William Shakespeare",
            "Romeo and Juliet is a famous play written by William Shakespeare.",
        ),
        ("What is 2 + 2?", "4", "Basic arithmetic: 2 + 2 equals 4."),
        (
            "What is the largest planet in our solar system?",
            "Jupiter",
            "Jupiter is the largest planet in our solar system.",
        ),
        (
            "Who painted the Mona Lisa?",
            "Leonardo da Vinci",
            "The Mona Lisa was painted by Leonardo da Vinci.",
        ),
    ]
    .into_iter()
    .filter_map(|(text, label, context)| {
        json!({"text": text, "label": label, "metadata": {"context": context}})
            .as_object()
            .cloned()
    })
    .collect()
}
