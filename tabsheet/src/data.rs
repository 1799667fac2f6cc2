//! Dataset descriptor handed to the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Key identifying one row record.
pub type RowKey = String;

/// A row record: field name to value.
///
/// A value is either a scalar or an object carrying an ordered `values`
/// array, which the renderer stacks vertically inside the cell.
pub type Record = BTreeMap<String, Value>;

/// Field layout of the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fields {
    #[serde(default)]
    pub rows: Vec<String>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    /// Whether measure values hang off the column header.
    #[serde(default = "default_value_in_cols")]
    pub value_in_cols: bool,
}

fn default_value_in_cols() -> bool {
    true
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            values: Vec::new(),
            value_in_cols: true,
        }
    }
}

/// Display metadata for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Externally supplied dataset descriptor.
///
/// `data` accepts either a keyed object or an array when deserialized; array
/// rows are keyed by their index.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabsheet::DataConfig;
///
/// let cfg: DataConfig = serde_json::from_value(json!({
///     "data": {
///         "r1": { "amount": { "values": [1, 2, 3] } },
///         "r2": { "amount": 5 }
///     }
/// }))
/// .unwrap();
///
/// assert_eq!(cfg.max_nested_len(), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub fields: Fields,
    #[serde(default)]
    pub meta: Vec<FieldMeta>,
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub data: BTreeMap<RowKey, Record>,
}

impl DataConfig {
    /// Creates an empty data config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field layout.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Adds a row record.
    pub fn with_row(mut self, key: impl Into<RowKey>, record: Record) -> Self {
        self.data.insert(key.into(), record);
        self
    }

    /// Returns true when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lengths of every nested `values` breakdown, across every field of
    /// every row.
    pub fn nested_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.data
            .values()
            .flat_map(|record| record.values())
            .filter_map(nested_len)
    }

    /// Longest nested breakdown in the dataset, if any field has one.
    pub fn max_nested_len(&self) -> Option<usize> {
        self.nested_lengths().max()
    }
}

/// Length of a field value's nested `values` array.
///
/// Only objects count; arrays and scalars are plain values.
pub fn nested_len(value: &Value) -> Option<usize> {
    match value {
        Value::Object(map) => match map.get("values") {
            Some(Value::Array(values)) => Some(values.len()),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowsRepr {
    Keyed(BTreeMap<RowKey, Record>),
    List(Vec<Record>),
}

fn deserialize_rows<'de, D>(deserializer: D) -> Result<BTreeMap<RowKey, Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RowsRepr::deserialize(deserializer)? {
        RowsRepr::Keyed(rows) => rows,
        RowsRepr::List(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(i, record)| (i.to_string(), record))
            .collect(),
    })
}
