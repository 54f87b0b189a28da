use serde_json::{Map, Value};
use thiserror::Error;

/// A single dataset row: field name to JSON value, in insertion order.
///
/// The shape is fixed per catalog name but nothing is shared across datasets,
/// so an open mapping is used instead of a typed struct.
pub type DatasetRecord = Map<String, Value>;

/// A source row lacked a field the target shape needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing field '{0}'")]
pub struct MissingField(pub String);

/// Field access helpers for [`DatasetRecord`].
pub trait RecordExt {
    /// Look up a field, failing if it is absent.
    fn require(&self, field: &str) -> Result<&Value, MissingField>;

    /// Build a new record from `(target, source)` field pairs.
    ///
    /// Every source field must be present; values are cloned as-is.
    fn project(&self, mapping: &[(&str, &str)]) -> Result<DatasetRecord, MissingField>;

    /// Look up a field as a string slice.
    fn str_field(&self, field: &str) -> Option<&str>;
}

impl RecordExt for DatasetRecord {
    fn require(&self, field: &str) -> Result<&Value, MissingField> {
        self.get(field).ok_or_else(|| MissingField(field.to_string()))
    }

    fn project(&self, mapping: &[(&str, &str)]) -> Result<DatasetRecord, MissingField> {
        let mut out = DatasetRecord::new();
        for (target, source) in mapping {
            out.insert((*target).to_string(), self.require(source)?.clone());
        }
        Ok(out)
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

/// Whether a value counts as present for required-field checks.
///
/// Null, `false`, zero, empty strings, empty arrays and empty objects are all
/// treated as missing.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
