//! List query parameters for `/api/resource/{doctype}`

use serde_json::Value;
use serde_json::json;

/// Comparison operator in a Frappe filter triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    NotLike,
    In,
    NotIn,
    /// `is set` / `is not set`, value is `"set"` or `"not set"`.
    Is,
    Between,
}

impl FilterOp {
    /// The operator as Frappe spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Like => "like",
            Self::NotLike => "not like",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Is => "is",
            Self::Between => "between",
        }
    }
}

/// A single `[field, operator, value]` filter.
///
/// ```
/// use frappe_lib::api::Filter;
///
/// let filter = Filter::eq("workflow_state", "مكتمل");
/// let filter = Filter::like("acc_name1", "%mohammed%");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// Creates a filter with any operator.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Ne, value)
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Like, pattern.into())
    }

    /// `field in (values...)`.
    pub fn is_in<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self::new(field, FilterOp::In, values)
    }

    /// `field is set`.
    pub fn is_set(field: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Is, "set")
    }

    /// `field is not set`.
    pub fn is_not_set(field: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Is, "not set")
    }

    fn to_json(&self) -> Value {
        json!([self.field, self.op.as_str(), self.value])
    }
}

/// Sort direction for `order_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Parameters of a document list request.
///
/// Unset parts are left to the server defaults (Frappe returns 20 rows
/// with only `name` when nothing is asked for).
///
/// ```
/// use frappe_lib::api::{ListQuery, Order};
///
/// let query = ListQuery::new()
///     .fields(["name", "wo_num1", "modified"])
///     .order_by("modified", Order::Desc)
///     .limit(100);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    fields: Vec<String>,
    filters: Vec<Filter>,
    or_filters: Vec<Filter>,
    order_by: Option<(String, Order)>,
    limit_start: Option<usize>,
    limit: Option<usize>,
    as_dict: bool,
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            as_dict: true,
            ..Default::default()
        }
    }

    /// Fields to return. `*` selects every field.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an AND filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds an OR filter.
    pub fn or_filter(mut self, filter: Filter) -> Self {
        self.or_filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: Order) -> Self {
        self.order_by = Some((field.into(), order));
        self
    }

    /// Offset of the first row.
    pub fn start(mut self, start: usize) -> Self {
        self.limit_start = Some(start);
        self
    }

    /// Page length. `0` asks for all rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return rows as objects (the default) or as positional arrays.
    pub fn as_dict(mut self, as_dict: bool) -> Self {
        self.as_dict = as_dict;
        self
    }

    /// Query-string pairs for the request.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if !self.fields.is_empty() {
            pairs.push(("fields".to_string(), json!(self.fields).to_string()));
        }
        if let Some(filters) = encode_filters(&self.filters) {
            pairs.push(("filters".to_string(), filters));
        }
        if let Some(filters) = encode_filters(&self.or_filters) {
            pairs.push(("or_filters".to_string(), filters));
        }
        if let Some((field, order)) = &self.order_by {
            pairs.push(("order_by".to_string(), format!("{} {}", field, order.as_str())));
        }
        if let Some(start) = self.limit_start {
            pairs.push(("limit_start".to_string(), start.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit_page_length".to_string(), limit.to_string()));
        }
        if self.as_dict {
            pairs.push(("as_dict".to_string(), "1".to_string()));
        }

        pairs
    }
}

pub(crate) fn encode_filters(filters: &[Filter]) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    let list: Vec<Value> = filters.iter().map(Filter::to_json).collect();
    Some(Value::Array(list).to_string())
}
