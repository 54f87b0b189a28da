use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed catalog of benchmark datasets that can be provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetName {
    #[serde(rename = "hotpot-300")]
    Hotpot300,
    #[serde(rename = "hotpot-500")]
    Hotpot500,
    #[serde(rename = "halu-eval-300")]
    HaluEval300,
    #[serde(rename = "tiny-test")]
    TinyTest,
    #[serde(rename = "gsm8k")]
    Gsm8k,
    #[serde(rename = "hotpot_qa")]
    HotpotQa,
    #[serde(rename = "ai2_arc")]
    Ai2Arc,
    #[serde(rename = "truthful_qa")]
    TruthfulQa,
    #[serde(rename = "cnn_dailymail")]
    CnnDailymail,
    #[serde(rename = "ragbench_sentence_relevance")]
    RagbenchSentenceRelevance,
    #[serde(rename = "election_questions")]
    ElectionQuestions,
    #[serde(rename = "medhallu")]
    Medhallu,
    #[serde(rename = "rag_hallucinations")]
    RagHallucinations,
}

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// A name outside the catalog was requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dataset: {0}")]
pub struct UnknownDataset(pub String);

impl DatasetName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotpot300 => "hotpot-300",
            Self::Hotpot500 => "hotpot-500",
            Self::HaluEval300 => "halu-eval-300",
            Self::TinyTest => "tiny-test",
            Self::Gsm8k => "gsm8k",
            Self::HotpotQa => "hotpot_qa",
            Self::Ai2Arc => "ai2_arc",
            Self::TruthfulQa => "truthful_qa",
            Self::CnnDailymail => "cnn_dailymail",
            Self::RagbenchSentenceRelevance => "ragbench_sentence_relevance",
            Self::ElectionQuestions => "election_questions",
            Self::Medhallu => "medhallu",
            Self::RagHallucinations => "rag_hallucinations",
        }
    }

    /// Every catalog entry, in declaration order.
    pub fn all() -> &'static [DatasetName] {
        &[
            Self::Hotpot300,
            Self::Hotpot500,
            Self::HaluEval300,
            Self::TinyTest,
            Self::Gsm8k,
            Self::HotpotQa,
            Self::Ai2Arc,
            Self::TruthfulQa,
            Self::CnnDailymail,
            Self::RagbenchSentenceRelevance,
            Self::ElectionQuestions,
            Self::Medhallu,
            Self::RagHallucinations,
        ]
    }

    /// Name under which the dataset is stored remotely.
    pub fn storage_key(&self, test_mode: bool) -> String {
        if test_mode {
            format!("{}_test", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }

    /// Number of records the loader aims for.
    pub fn sample_size(&self, test_mode: bool) -> usize {
        match (self, test_mode) {
            (Self::Hotpot300, false) => 300,
            (Self::Hotpot300, true) => 3,
            (Self::Hotpot500, false) => 500,
            (Self::TinyTest, _) => 5,
            (Self::CnnDailymail, false) => 100,
            (_, true) => 5,
            (_, false) => 300,
        }
    }

    /// Whether the loader uses the sampling seed.
    ///
    /// Only `halu-eval-300` samples randomly. The others accept a seed and
    /// drop it; callers relying on the seed for other names get a fixed
    /// slice.
    pub fn honors_seed(&self) -> bool {
        matches!(self, Self::HaluEval300)
    }
}

impl std::fmt::Display for DatasetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DatasetName {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownDataset(s.to_string()))
    }
}
