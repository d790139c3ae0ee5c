//! Work order records.

use frappe_lib::error::Error;
use frappe_lib::model::Document;
use serde::Deserialize;
use serde::Serialize;

/// One row of `work_order_list` as fetched for the projects table.
///
/// Every field except `name` may be absent or null on the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkOrder {
    pub name: String,
    pub wo_num1: Option<String>,
    pub company: Option<String>,
    pub acc_name1: Option<String>,
    pub job_type1: Option<String>,
    pub district_name: Option<String>,
    pub create_date1: Option<String>,
    pub workflow_state: Option<String>,
    pub work_order_status1: Option<String>,
    pub modified: Option<String>,
}

impl WorkOrder {
    pub fn from_document(doc: Document) -> Result<Self, Error> {
        doc.into_typed()
    }

    /// The displayed status: the explicit status field, else the workflow
    /// state.
    pub fn status(&self) -> Option<&str> {
        self.work_order_status1
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.workflow_state.as_deref().filter(|s| !s.is_empty()))
    }

    /// The work order number, or the document name when none was entered.
    pub fn number(&self) -> &str {
        self.wo_num1
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }
}

/// A line item of a work order (`work_items_details1` child row).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub item_name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub total_amount: f64,
}

impl WorkItem {
    /// Creates an item; the total is derived from quantity and unit price.
    pub fn new(item_name: impl Into<String>, quantity: f64, unit: impl Into<String>, unit_price: f64) -> Self {
        Self {
            item_name: item_name.into(),
            description: String::new(),
            quantity,
            unit: unit.into(),
            unit_price,
            total_amount: quantity * unit_price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parses `name:quantity:unit:price`, with an optional fifth
    /// `:description` part.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.splitn(5, ':').map(str::trim);
        let name = parts.next().filter(|n| !n.is_empty())?;
        let quantity = parts.next()?.parse::<f64>().ok().filter(|q| q.is_finite() && *q >= 0.0)?;
        let unit = parts.next()?;
        let unit_price = parts.next()?.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)?;
        let item = Self::new(name, quantity, unit, unit_price);
        Some(match parts.next() {
            Some(description) => item.with_description(description),
            None => item,
        })
    }
}
