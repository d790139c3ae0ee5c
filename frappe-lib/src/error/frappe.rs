//! Frappe-specific error types

use serde_json::Value;

/// Error information parsed from a Frappe error response.
///
/// Frappe error bodies carry some of `exc_type`, `exception`, `message`
/// and `_server_messages` (a JSON string holding a list of JSON strings,
/// each an object with a `message` key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrappeErrorDetail {
    /// Exception class name, e.g. `PermissionError` or `ValidationError`.
    pub exc_type: Option<String>,
    /// Fully qualified exception line, e.g. `frappe.exceptions.PermissionError: ...`.
    pub exception: Option<String>,
    /// The `message` field, when it is a string.
    pub message: Option<String>,
    /// Messages decoded from `_server_messages`.
    pub server_messages: Vec<String>,
}

impl FrappeErrorDetail {
    /// Parses a response body. Returns `None` if the body is not a JSON
    /// object or carries none of the known error fields.
    pub fn from_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let object = value.as_object()?;

        let string = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let detail = Self {
            exc_type: string("exc_type"),
            exception: string("exception"),
            message: string("message"),
            server_messages: object
                .get("_server_messages")
                .and_then(Value::as_str)
                .map(decode_server_messages)
                .unwrap_or_default(),
        };

        if detail.exc_type.is_none()
            && detail.exception.is_none()
            && detail.message.is_none()
            && detail.server_messages.is_empty()
        {
            return None;
        }
        Some(detail)
    }

    /// The most useful human-readable message available.
    pub fn summary(&self) -> &str {
        self.server_messages
            .first()
            .map(String::as_str)
            .or(self.message.as_deref())
            .or(self.exception.as_deref())
            .or(self.exc_type.as_deref())
            .unwrap_or("Unknown error")
    }
}

impl std::fmt::Display for FrappeErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.exc_type {
            Some(exc_type) => write!(f, "[{}] {}", exc_type, self.summary()),
            None => write!(f, "{}", self.summary()),
        }
    }
}

fn decode_server_messages(raw: &str) -> Vec<String> {
    let Ok(entries) = serde_json::from_str::<Vec<String>>(raw) else {
        return Vec::new();
    };
    entries
        .into_iter()
        .map(|entry| match serde_json::from_str::<Value>(&entry) {
            Ok(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(entry),
            _ => entry,
        })
        .collect()
}
