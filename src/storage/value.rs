//! Flat key-value rows.
//!
//! A [`Row`] is an ordered list of `(column, Value)` pairs. It is what every
//! select returns and what insert/update accept as input.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A dynamically typed SQL value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL `NULL`
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// Double precision float
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
    /// Boolean
    Bool(bool),
}

impl Value {
    /// Returns `true` for SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Best-effort integer view of the value.
    ///
    /// Reals are truncated and text is parsed, so a position column stored as
    /// `'3'` still reads as 3. Null and blobs yield `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Real(v) => Some(*v as i64),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Null | Value::Blob(_) => None,
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parses CLI-style input: integers become `Integer`, anything else `Text`.
    pub fn parse_loose(input: &str) -> Value {
        match input.parse::<i64>() {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Text(input.to_string()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// An ordered mapping from column name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Row::set`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Sets a column, replacing an existing value in place.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Looks up a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Integer view of a column, see [`Value::as_i64`].
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(Value::as_i64)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.set(column, value);
        }
        row
    }
}

// Serialized as a JSON object, keeping column order
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_i64_conversions() {
        assert_eq!(Value::Integer(7).as_i64(), Some(7));
        assert_eq!(Value::Real(3.9).as_i64(), Some(3));
        assert_eq!(Value::Text(" 12 ".to_string()).as_i64(), Some(12));
        assert_eq!(Value::Text("abc".to_string()).as_i64(), None);
        assert_eq!(Value::Bool(true).as_i64(), Some(1));
        assert_eq!(Value::Null.as_i64(), None);
    }

    #[test]
    fn test_parse_loose() {
        assert_eq!(Value::parse_loose("42"), Value::Integer(42));
        assert_eq!(Value::parse_loose("-3"), Value::Integer(-3));
        assert_eq!(Value::parse_loose("draft"), Value::Text("draft".to_string()));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn test_row_set_replaces_in_place() {
        let mut row = Row::new().with("id", 1).with("title", "a");
        row.set("id", 2);

        assert_eq!(row.len(), 2);
        assert_eq!(row.get_i64("id"), Some(2));
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "title"]);
    }

    #[test]
    fn test_row_serializes_as_ordered_object() {
        let row = Row::new()
            .with("id", 1)
            .with("title", "first")
            .with("parent_id", None::<i64>);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"id":1,"title":"first","parent_id":null}"#);
    }
}
