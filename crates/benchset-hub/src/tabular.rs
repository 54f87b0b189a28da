use arrow::json::ArrayWriter;
use async_trait::async_trait;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use rand::SeedableRng;
use rand::rngs::StdRng;

use benchset_core::record::DatasetRecord;

use crate::error::HubError;

/// Fetch a remote columnar file and return its rows.
#[async_trait]
pub trait TabularFetch: Send + Sync {
    async fn fetch_table(&self, uri: &str) -> Result<Vec<DatasetRecord>, HubError>;
}

/// Decode a parquet file into row mappings.
///
/// Columns become fields in schema order; nulls are omitted from the row.
pub fn decode_parquet<R: ChunkReader + 'static>(data: R) -> Result<Vec<DatasetRecord>, HubError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(data)?.build()?;

    let mut writer = ArrayWriter::new(Vec::new());
    for batch in reader {
        writer.write(&batch?)?;
    }
    writer.finish()?;

    let buf = writer.into_inner();
    if buf.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&buf)?)
}

/// Pick `n` rows without replacement, reproducibly for a given seed.
///
/// Returns every row (in sampled order) when fewer than `n` exist.
pub fn sample_rows(rows: Vec<DatasetRecord>, n: usize, seed: u64) -> Vec<DatasetRecord> {
    let amount = n.min(rows.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, rows.len(), amount);

    let mut slots: Vec<Option<DatasetRecord>> = rows.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, BooleanArray, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use serde_json::json;

    fn numbered(n: usize) -> Vec<DatasetRecord> {
        (0..n)
            .map(|i| json!({"idx": i}).as_object().cloned().unwrap())
            .collect()
    }

    fn write_parquet(path: &std::path::Path) {
        let schema = Arc::new(Schema::new(vec![
            Field::new("user_query", DataType::Utf8, false),
            Field::new("score", DataType::Int64, true),
            Field::new("flag", DataType::Boolean, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["q0", "q1", "q2"])),
            Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])),
            Arc::new(BooleanArray::from(vec![true, false, true])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn decode_parquet_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.parquet");
        write_parquet(&path);

        let rows = decode_parquet(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["user_query"], json!("q0"));
        assert_eq!(rows[0]["score"], json!(1));
        assert_eq!(rows[2]["flag"], json!(true));
        assert!(!rows[1].contains_key("score"));
    }

    #[test]
    fn decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.parquet");
        std::fs::write(&path, b"not parquet at all").unwrap();
        let err = decode_parquet(std::fs::File::open(&path).unwrap()).unwrap_err();
        assert!(matches!(err, HubError::Parquet(_)));
    }

    #[test]
    fn sample_is_deterministic_per_seed() {
        let a = sample_rows(numbered(1000), 300, 42);
        let b = sample_rows(numbered(1000), 300, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 300);

        let c = sample_rows(numbered(1000), 300, 7);
        assert_eq!(c.len(), 300);
        assert_ne!(a, c);
    }

    #[test]
    fn sample_has_no_duplicates() {
        let picked = sample_rows(numbered(50), 50, 1);
        let mut idx: Vec<u64> = picked.iter().map(|r| r["idx"].as_u64().unwrap()).collect();
        idx.sort_unstable();
        idx.dedup();
        assert_eq!(idx.len(), 50);
    }

    #[test]
    fn sample_caps_at_available_rows() {
        assert_eq!(sample_rows(numbered(4), 300, 42).len(), 4);
        assert!(sample_rows(Vec::new(), 5, 42).is_empty());
    }
}
