use proptest::prelude::*;
use serde_json::json;

use benchset_core::record::DatasetRecord;
use benchset_hub::prelude::*;

fn numbered(n: usize) -> Vec<DatasetRecord> {
    (0..n)
        .map(|i| json!({"idx": i}).as_object().cloned().unwrap())
        .collect()
}

fn split() -> HubSplit {
    HubSplit::new("org/data", "default", "train")
}

proptest! {
    /// Same seed, same sample; size is min(n, len).
    #[test]
    fn sample_reproducible(len in 0usize..400, n in 0usize..500, seed in any::<u64>()) {
        let a = sample_rows(numbered(len), n, seed);
        let b = sample_rows(numbered(len), n, seed);
        prop_assert_eq!(a.len(), n.min(len));
        prop_assert_eq!(a, b);
    }

    /// Streaming returns a prefix of the split, never longer than asked.
    #[test]
    fn take_returns_prefix(len in 0usize..350, n in 0usize..400) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let hub = StaticHub::new().with_split(split(), numbered(len));
        let rows = rt.block_on(take_rows(&hub, &split(), n)).unwrap();

        prop_assert_eq!(rows.len(), n.min(len));
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row["idx"].as_u64(), Some(i as u64));
        }
    }

    /// Exact selection succeeds iff the split is long enough.
    #[test]
    fn select_exact_or_error(len in 0usize..250, n in 1usize..300) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let hub = StaticHub::new().with_split(split(), numbered(len));
        let result = rt.block_on(select_rows(&hub, &split(), n));

        if len >= n {
            prop_assert_eq!(result.unwrap().len(), n);
        } else {
            let is_short = matches!(result, Err(HubError::NotEnoughRows { .. }));
            prop_assert!(is_short);
        }
    }
}
