use benchset_core::catalog::DatasetName;
use benchset_core::record::{DatasetRecord, RecordExt};
use benchset_hub::tabular::{TabularFetch, sample_rows};

use super::unavailable;
use crate::error::SourceError;

pub const HALU_EVAL_URI: &str =
    "hf://datasets/pminervini/HaluEval/general/data-00000-of-00001.parquet";

const FIELDS: &[(&str, &str)] = &[
    ("input", "user_query"),
    ("llm_output", "chatgpt_response"),
    ("expected_hallucination_label", "hallucination"),
];

/// Seeded random sample of the HaluEval general split.
pub(super) async fn load(
    tables: &dyn TabularFetch,
    name: DatasetName,
    size: usize,
    seed: u64,
) -> Result<Vec<DatasetRecord>, SourceError> {
    let table = tables
        .fetch_table(HALU_EVAL_URI)
        .await
        .map_err(unavailable(name))?;

    sample_rows(table, size, seed)
        .iter()
        .map(|row| row.project(FIELDS))
        .collect::<Result<_, _>>()
        .map_err(|source| SourceError::Malformed {
            dataset: name,
            source,
        })
}
