use std::collections::HashSet;

use serde_json::{Value, json};

use benchset_core::catalog::DatasetName;
use benchset_core::record::{DatasetRecord, MissingField, RecordExt, is_truthy};
use benchset_hub::hub::{DatasetHub, HubSplit, fetch_all_rows};

use super::unavailable;
use crate::error::SourceError;

/// Fields the answer-relevance metrics read; rows lacking any are dropped.
const REQUIRED_FIELDS: &[&str] = &[
    "question",
    "answer",
    "choices",
    "correct_answer",
    "input",
    "output",
    "context",
];

const MC_TARGETS: &[&str] = &["mc1_targets", "mc2_targets"];

/// Strings in first-seen order, without repeats.
#[derive(Default)]
struct OrderedSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedSet {
    fn insert(&mut self, item: &str) {
        if self.seen.insert(item.to_string()) {
            self.items.push(item.to_string());
        }
    }

    fn extend<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) {
        for item in items {
            self.insert(item);
        }
    }

    fn into_value(self) -> Value {
        Value::from(self.items)
    }
}

fn strings(value: &Value) -> impl Iterator<Item = &str> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

/// Choices of an `mcN_targets` block, optionally only those labelled correct.
fn target_choices<'a>(mc_row: &'a DatasetRecord, key: &str, correct_only: bool) -> Vec<&'a str> {
    let Some(targets) = mc_row.get(key) else {
        return Vec::new();
    };
    let choices = targets.get("choices").and_then(Value::as_array);
    let labels = targets.get("labels").and_then(Value::as_array);

    match (choices, labels) {
        (Some(choices), _) if !correct_only => {
            choices.iter().filter_map(Value::as_str).collect()
        }
        (Some(choices), Some(labels)) => choices
            .iter()
            .zip(labels)
            .filter(|(_, label)| label.as_i64() == Some(1))
            .filter_map(|(choice, _)| choice.as_str())
            .collect(),
        _ => Vec::new(),
    }
}

/// Merge one generation row with its multiple-choice counterpart.
fn merge(gen_row: &DatasetRecord, mc_row: &DatasetRecord) -> Result<DatasetRecord, MissingField> {
    let question = gen_row.require("question")?.clone();
    let best_answer = gen_row.require("best_answer")?.clone();
    let correct = gen_row.require("correct_answers")?;
    let incorrect = gen_row.require("incorrect_answers")?;
    let category = gen_row.require("category")?.clone();

    let mut correct_answers = OrderedSet::default();
    correct_answers.extend(strings(correct));
    for key in MC_TARGETS {
        correct_answers.extend(target_choices(mc_row, key, true));
    }

    let mut all_answers = OrderedSet::default();
    all_answers.extend(strings(correct));
    all_answers.extend(strings(incorrect));
    for key in MC_TARGETS {
        all_answers.extend(target_choices(mc_row, key, false));
    }

    let context = gen_row.get("source").cloned().unwrap_or_else(|| json!(""));

    let mut record = DatasetRecord::new();
    record.insert("question".into(), question.clone());
    record.insert("answer".into(), best_answer.clone());
    record.insert("choices".into(), all_answers.into_value());
    record.insert("correct_answer".into(), best_answer.clone());
    record.insert("input".into(), question);
    record.insert("output".into(), best_answer);
    record.insert("context".into(), context);
    record.insert("type".into(), json!("TEXT"));
    record.insert("category".into(), category);
    record.insert("source".into(), json!("MANUAL"));
    record.insert("correct_answers".into(), correct_answers.into_value());
    record.insert("incorrect_answers".into(), incorrect.clone());
    Ok(record)
}

fn has_required_fields(record: &DatasetRecord) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| record.get(*field).is_some_and(is_truthy))
}

/// Zip the generation and multiple-choice validation splits into one record set.
pub(super) async fn load(
    hub: &dyn DatasetHub,
    name: DatasetName,
    size: usize,
) -> Result<Vec<DatasetRecord>, SourceError> {
    let generation = HubSplit::new("truthful_qa", "generation", "validation");
    let multiple_choice = HubSplit::new("truthful_qa", "multiple_choice", "validation");

    let gen_rows = fetch_all_rows(hub, &generation)
        .await
        .map_err(unavailable(name))?;
    let mc_rows = fetch_all_rows(hub, &multiple_choice)
        .await
        .map_err(unavailable(name))?;

    let mut records = Vec::new();
    for (gen_row, mc_row) in gen_rows.iter().zip(&mc_rows) {
        if records.len() >= size {
            break;
        }
        let record = merge(gen_row, mc_row).map_err(|source| SourceError::Malformed {
            dataset: name,
            source,
        })?;
        if has_required_fields(&record) {
            records.push(record);
        }
    }

    if records.is_empty() {
        tracing::error!("no usable TruthfulQA rows among {} pairs", gen_rows.len());
        return Err(SourceError::Empty { dataset: name });
    }
    Ok(records)
}
