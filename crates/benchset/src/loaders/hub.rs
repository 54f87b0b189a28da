use benchset_core::catalog::DatasetName;
use benchset_core::record::{DatasetRecord, RecordExt};
use benchset_hub::hub::{DatasetHub, HubSplit, select_rows, take_rows};

use super::unavailable;
use crate::error::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fetch {
    /// Stop after N rows; a shorter split is fine.
    Stream,
    /// The first N rows must all exist.
    Select,
}

/// Hub location and field mapping for one catalog entry.
#[derive(Debug)]
struct HubSource {
    dataset: &'static str,
    config: &'static str,
    split: &'static str,
    fetch: Fetch,
    /// `(target, source)` pairs.
    fields: &'static [(&'static str, &'static str)],
}

impl HubSource {
    fn split(&self) -> HubSplit {
        HubSplit::new(self.dataset, self.config, self.split)
    }
}

/// Catalog entries whose rows map one-to-one onto records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HubDataset {
    Gsm8k,
    HotpotQa,
    Ai2Arc,
    CnnDailymail,
    RagbenchSentenceRelevance,
    ElectionQuestions,
    Medhallu,
    RagHallucinations,
}

impl HubDataset {
    #[cfg(test)]
    const ALL: [HubDataset; 8] = [
        Self::Gsm8k,
        Self::HotpotQa,
        Self::Ai2Arc,
        Self::CnnDailymail,
        Self::RagbenchSentenceRelevance,
        Self::ElectionQuestions,
        Self::Medhallu,
        Self::RagHallucinations,
    ];

    pub(super) fn name(self) -> DatasetName {
        match self {
            Self::Gsm8k => DatasetName::Gsm8k,
            Self::HotpotQa => DatasetName::HotpotQa,
            Self::Ai2Arc => DatasetName::Ai2Arc,
            Self::CnnDailymail => DatasetName::CnnDailymail,
            Self::RagbenchSentenceRelevance => DatasetName::RagbenchSentenceRelevance,
            Self::ElectionQuestions => DatasetName::ElectionQuestions,
            Self::Medhallu => DatasetName::Medhallu,
            Self::RagHallucinations => DatasetName::RagHallucinations,
        }
    }

    fn source(self) -> HubSource {
        match self {
            Self::Gsm8k => HubSource {
                dataset: "gsm8k",
                config: "main",
                split: "train",
                fetch: Fetch::Stream,
                fields: &[("question", "question"), ("answer", "answer")],
            },
            Self::HotpotQa => HubSource {
                dataset: "hotpot_qa",
                config: "distractor",
                split: "train",
                fetch: Fetch::Stream,
                fields: &[
                    ("question", "question"),
                    ("answer", "answer"),
                    ("context", "context"),
                ],
            },
            Self::Ai2Arc => HubSource {
                dataset: "ai2_arc",
                config: "ARC-Challenge",
                split: "train",
                fetch: Fetch::Stream,
                fields: &[
                    ("question", "question"),
                    ("answer", "answerKey"),
                    ("choices", "choices"),
                ],
            },
            Self::CnnDailymail => HubSource {
                dataset: "cnn_dailymail",
                config: "3.0.0",
                split: "validation",
                fetch: Fetch::Stream,
                fields: &[("article", "article"), ("highlights", "highlights")],
            },
            Self::RagbenchSentenceRelevance => HubSource {
                dataset: "wandb/ragbench-sentence-relevance-balanced",
                config: "default",
                split: "train",
                fetch: Fetch::Select,
                fields: &[
                    ("question", "question"),
                    ("sentence", "sentence"),
                    ("label", "label"),
                ],
            },
            Self::ElectionQuestions => HubSource {
                dataset: "Anthropic/election_questions",
                config: "default",
                split: "test",
                fetch: Fetch::Select,
                fields: &[("question", "question"), ("label", "label")],
            },
            Self::Medhallu => HubSource {
                dataset: "UTAustin-AIHealth/MedHallu",
                config: "pqa_labeled",
                split: "train",
                fetch: Fetch::Select,
                fields: &[
                    ("question", "Question"),
                    ("knowledge", "Knowledge"),
                    ("ground_truth", "Ground Truth"),
                    ("hallucinated_answer", "Hallucinated Answer"),
                    ("difficulty_level", "Difficulty Level"),
                    ("hallucination_category", "Category of Hallucination"),
                ],
            },
            Self::RagHallucinations => HubSource {
                dataset: "aporia-ai/rag_hallucinations",
                config: "default",
                split: "train",
                fetch: Fetch::Select,
                fields: &[
                    ("context", "context"),
                    ("question", "question"),
                    ("answer", "answer"),
                    ("is_hallucination", "is_hallucination"),
                ],
            },
        }
    }
}

/// Load a dataset whose rows map one-to-one onto records.
pub(super) async fn load(
    hub: &dyn DatasetHub,
    dataset: HubDataset,
    size: usize,
) -> Result<Vec<DatasetRecord>, SourceError> {
    let name = dataset.name();
    let origin = dataset.source();
    let split = origin.split();

    let rows = match origin.fetch {
        Fetch::Stream => take_rows(hub, &split, size).await,
        Fetch::Select => select_rows(hub, &split, size).await,
    }
    .map_err(unavailable(name))?;

    rows.iter()
        .map(|row| row.project(origin.fields))
        .collect::<Result<_, _>>()
        .map_err(|source| SourceError::Malformed {
            dataset: name,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchset_hub::memory::StaticHub;
    use serde_json::json;

    fn row(value: serde_json::Value) -> DatasetRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn hub_datasets_map_to_distinct_splits() {
        let mut seen = std::collections::HashSet::new();
        for dataset in HubDataset::ALL {
            let origin = dataset.source();
            assert!(!origin.fields.is_empty());
            assert!(seen.insert(origin.split()), "{} shares a split", dataset.name());
        }
        let names: std::collections::HashSet<_> =
            HubDataset::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(names.len(), HubDataset::ALL.len());
    }

    #[tokio::test]
    async fn ai2_arc_renames_answer_key() {
        let split = HubSplit::new("ai2_arc", "ARC-Challenge", "train");
        let choices = json!({"text": ["a", "b"], "label": ["A", "B"]});
        let hub = StaticHub::new().with_split(
            split,
            vec![row(json!({"id": "x", "question": "q", "answerKey": "B", "choices": choices}))],
        );

        let out = load(&hub, HubDataset::Ai2Arc, 5).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["answer"], json!("B"));
        assert_eq!(out[0]["choices"], choices);
        assert!(!out[0].contains_key("id"));
    }

    #[tokio::test]
    async fn medhallu_maps_spaced_columns() {
        let split = HubSplit::new("UTAustin-AIHealth/MedHallu", "pqa_labeled", "train");
        let hub = StaticHub::new().with_split(
            split,
            vec![row(json!({
                "Question": "q",
                "Knowledge": ["k"],
                "Ground Truth": "gt",
                "Hallucinated Answer": "ha",
                "Difficulty Level": "easy",
                "Category of Hallucination": "cat"
            }))],
        );

        let out = load(&hub, HubDataset::Medhallu, 1).await.unwrap();
        assert_eq!(out[0]["ground_truth"], json!("gt"));
        assert_eq!(out[0]["hallucination_category"], json!("cat"));
        assert_eq!(out[0].len(), 6);
    }

    #[tokio::test]
    async fn select_source_rejects_short_split() {
        let split = HubSplit::new("Anthropic/election_questions", "default", "test");
        let hub = StaticHub::new().with_split(
            split,
            vec![row(json!({"question": "q", "label": "Harmless"}))],
        );

        let err = load(&hub, HubDataset::ElectionQuestions, 5).await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::Unavailable {
                dataset: DatasetName::ElectionQuestions,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_column_is_malformed() {
        let split = HubSplit::new("gsm8k", "main", "train");
        let hub = StaticHub::new().with_split(split, vec![row(json!({"question": "q"}))]);

        let err = load(&hub, HubDataset::Gsm8k, 5).await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
        assert!(err.to_string().contains("answer"));
    }
}
