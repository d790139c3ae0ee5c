//! DocType name

/// The name of a Frappe DocType, e.g. `work_order_list` or `Sales Invoice`.
///
/// DocType names may contain spaces, so they are percent-encoded when used
/// as a URL path segment.
///
/// ```
/// use frappe_lib::model::DocType;
///
/// let doctype = DocType::new("Sales Invoice");
/// assert_eq!(doctype.path_segment(), "Sales%20Invoice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocType(String);

impl DocType {
    /// Creates a DocType from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the DocType name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns the name encoded for use in `/api/resource/{doctype}`.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl From<&str> for DocType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DocType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
