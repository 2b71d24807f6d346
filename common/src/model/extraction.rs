use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields read off one W-2 image, keyed by the label text printed on the form.
///
/// There is no fixed schema: keys and their order are whatever the model
/// returned. Order is kept so the first stored extraction defines the CSV
/// header in the same order the model listed the fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields(Map<String, Value>);

impl ExtractedFields {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.get(label)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Field labels in the order the model returned them.
    pub fn labels(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Values rendered as text cells, aligned with [`ExtractedFields::labels`].
    ///
    /// Strings are written as-is; any other JSON value is written as its JSON
    /// text (`null`, `12`, `true`, ...).
    pub fn cells(&self) -> Vec<String> {
        self.0.values().map(cell_text).collect()
    }

    /// Label/value pairs as display strings.
    pub fn rows(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), cell_text(v)))
    }
}

impl From<Map<String, Value>> for ExtractedFields {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
