//! Dynamic document

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::error::Error;
use crate::error::FieldError;

/// A dynamic Frappe document.
///
/// Frappe returns documents as flat JSON objects. Standard fields
/// (`name`, `modified`, `owner`, ...) sit next to the DocType's own fields,
/// so every field is kept in one map. Typed getters give checked access.
///
/// # Example
///
/// ```
/// use frappe_lib::model::Document;
///
/// let doc = Document::new()
///     .set("wo_num1", "WO-001")
///     .set("quantity", 3);
///
/// assert_eq!(doc.get_string("wo_num1").unwrap(), Some("WO-001"));
/// assert_eq!(doc.get_int("quantity").unwrap(), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Converts any serializable value into a document.
    ///
    /// Fails if the value does not serialize to a JSON object.
    pub fn from_typed<T: Serialize>(value: &T) -> Result<Self, Error> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(FieldError::type_mismatch("<document>", "object", type_name(&other)).into()),
        }
    }

    /// Deserializes the document into a typed struct.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, Error> {
        Ok(serde_json::from_value(Value::Object(self.fields))?)
    }

    // =========================================================================
    // Standard fields
    // =========================================================================

    /// The document name (primary key), if present.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// The `modified` timestamp as sent by the server, if present.
    pub fn modified(&self) -> Option<&str> {
        self.fields.get("modified").and_then(Value::as_str)
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the document contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the document and returns its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", type_name(other))),
        }
    }

    /// Gets an integer field value.
    ///
    /// Frappe sends `Check` fields as `0`/`1`, which this accepts too.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "int", "float")),
            Some(other) => Err(FieldError::type_mismatch(field, "int", type_name(other))),
        }
    }

    /// Gets a float field value. Integers widen.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => Err(FieldError::type_mismatch(field, "float", type_name(other))),
        }
    }

    /// Gets a boolean field value. `Check` fields (`0`/`1`) are accepted.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::Number(n)) if n.as_i64() == Some(0) => Ok(Some(false)),
            Some(Value::Number(n)) if n.as_i64() == Some(1) => Ok(Some(true)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", type_name(other))),
        }
    }

    /// Gets a child table (list of row objects).
    pub fn get_table(&self, field: &str) -> Result<Option<&Vec<Value>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Array(rows)) => Ok(Some(rows)),
            Some(other) => Err(FieldError::type_mismatch(field, "table", type_name(other))),
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Document {
        serde_json::from_value(json!({
            "name": "WO-0001",
            "wo_num1": "1001",
            "acc_name1": null,
            "quantity": 4,
            "unit_price": 12.5,
            "is_urgent": 1,
            "work_items_details1": [{"item_name": "Cable"}],
            "modified": "2025-01-02 10:00:00.000000"
        }))
        .unwrap()
    }

    #[test]
    fn test_standard_fields() {
        let doc = sample();
        assert_eq!(doc.name(), Some("WO-0001"));
        assert_eq!(doc.modified(), Some("2025-01-02 10:00:00.000000"));
    }

    #[test]
    fn test_typed_getters() {
        let doc = sample();
        assert_eq!(doc.get_string("wo_num1").unwrap(), Some("1001"));
        assert_eq!(doc.get_string("acc_name1").unwrap(), None);
        assert_eq!(doc.get_int("quantity").unwrap(), Some(4));
        assert_eq!(doc.get_float("quantity").unwrap(), Some(4.0));
        assert_eq!(doc.get_float("unit_price").unwrap(), Some(12.5));
        assert_eq!(doc.get_bool("is_urgent").unwrap(), Some(true));
        assert_eq!(doc.get_table("work_items_details1").unwrap().map(Vec::len), Some(1));
    }

    #[test]
    fn test_getter_errors() {
        let doc = sample();
        assert!(matches!(doc.get_string("nope"), Err(FieldError::Missing { .. })));
        assert!(matches!(
            doc.get_string("quantity"),
            Err(FieldError::TypeMismatch { expected: "string", actual: "number", .. })
        ));
        assert!(matches!(doc.get_int("unit_price"), Err(FieldError::TypeMismatch { .. })));
    }

    #[test]
    fn test_typed_conversion() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Order {
            name: String,
            quantity: i64,
        }

        let doc = Document::new().set("name", "A").set("quantity", 2);
        let order: Order = doc.clone().into_typed().unwrap();
        assert_eq!(order, Order { name: "A".to_string(), quantity: 2 });
        assert_eq!(Document::from_typed(&order).unwrap(), doc);

        assert!(Document::from_typed(&vec![1, 2]).is_err());
    }
}
