//! Create and update forms for work orders.
//!
//! Validation collects every failing field at once, in form order, with
//! the Arabic message shown next to the field.

use chrono::NaiveDate;
use frappe_lib::error::FieldValidationError;
use frappe_lib::model::Document;
use serde_json::Value;

use super::constants::DEFAULT_COMPANY;
use super::constants::INITIAL_STATUS;
use super::constants::ITEMS_FIELD;
use super::constants::is_known_job_type;
use super::constants::is_known_status;
use super::constants::messages;
use super::model::WorkItem;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of a new work order.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderForm {
    pub wo_num1: String,
    pub company: String,
    pub acc_name1: String,
    pub job_type1: Option<String>,
    pub district_name: Option<String>,
    /// `YYYY-MM-DD`.
    pub create_date1: String,
    pub team_la: Option<String>,
    /// `YYYY-MM-DD`.
    pub indx_date: String,
    pub items: Vec<WorkItem>,
}

impl WorkOrderForm {
    /// An empty form with the default company and both dates set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        let today = today.format(DATE_FORMAT).to_string();
        Self {
            wo_num1: String::new(),
            company: DEFAULT_COMPANY.to_string(),
            acc_name1: String::new(),
            job_type1: None,
            district_name: None,
            create_date1: today.clone(),
            team_la: None,
            indx_date: today,
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: WorkItem) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, index: usize) -> Option<WorkItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Sum of all item totals.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|item| item.total_amount).sum()
    }

    pub fn validate(&self) -> Result<(), Vec<FieldValidationError>> {
        let mut errors = Vec::new();

        if self.wo_num1.trim().is_empty() {
            errors.push(FieldValidationError::new("wo_num1", messages::WO_NUM_REQUIRED));
        }
        if self.acc_name1.trim().is_empty() {
            errors.push(FieldValidationError::new("acc_name1", messages::CUSTOMER_REQUIRED));
        }
        if let Some(job_type) = non_empty(&self.job_type1)
            && !is_known_job_type(job_type)
        {
            errors.push(FieldValidationError::new("job_type1", messages::UNKNOWN_JOB_TYPE));
        }
        for (field, value) in [("create_date1", &self.create_date1), ("indx_date", &self.indx_date)] {
            if parse_date(value).is_none() {
                errors.push(FieldValidationError::new(field, messages::INVALID_DATE));
            }
        }
        if self.items.is_empty() {
            errors.push(FieldValidationError::new(ITEMS_FIELD, messages::ITEM_REQUIRED));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The document to post. New work orders always enter the workflow at
    /// [`INITIAL_STATUS`].
    pub fn to_document(&self) -> Document {
        let items: Vec<Value> = self
            .items
            .iter()
            .filter_map(|item| serde_json::to_value(item).ok())
            .collect();

        let mut doc = Document::new()
            .set("wo_num1", self.wo_num1.trim())
            .set("company", self.company.trim())
            .set("acc_name1", self.acc_name1.trim())
            .set("create_date1", self.create_date1.as_str())
            .set("indx_date", self.indx_date.as_str())
            .set("workflow_state", INITIAL_STATUS)
            .set("work_order_status1", INITIAL_STATUS)
            .set(ITEMS_FIELD, items);
        for (field, value) in [
            ("job_type1", &self.job_type1),
            ("district_name", &self.district_name),
            ("team_la", &self.team_la),
        ] {
            if let Some(value) = non_empty(value) {
                doc.insert(field, value);
            }
        }
        doc
    }
}

/// Changed fields of an existing work order. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkOrderUpdate {
    pub work_order_status1: Option<String>,
    pub acc_name1: Option<String>,
    pub company: Option<String>,
    pub job_type1: Option<String>,
    pub district_name: Option<String>,
    pub team_la: Option<String>,
}

impl WorkOrderUpdate {
    pub fn is_empty(&self) -> bool {
        self.fields().all(|(_, value)| value.is_none())
    }

    pub fn validate(&self) -> Result<(), Vec<FieldValidationError>> {
        let mut errors = Vec::new();

        if self.is_empty() {
            errors.push(FieldValidationError::new("name", messages::NOTHING_TO_UPDATE));
        }
        if let Some(status) = &self.work_order_status1
            && !is_known_status(status.trim())
        {
            errors.push(FieldValidationError::new("work_order_status1", messages::UNKNOWN_STATUS));
        }
        if let Some(customer) = &self.acc_name1
            && customer.trim().is_empty()
        {
            errors.push(FieldValidationError::new("acc_name1", messages::CUSTOMER_REQUIRED));
        }
        if let Some(job_type) = &self.job_type1
            && !is_known_job_type(job_type.trim())
        {
            errors.push(FieldValidationError::new("job_type1", messages::UNKNOWN_JOB_TYPE));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Only the fields that were given.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for (field, value) in self.fields() {
            if let Some(value) = value {
                doc.insert(field, value.trim());
            }
        }
        doc
    }

    fn fields(&self) -> impl Iterator<Item = (&'static str, &Option<String>)> {
        [
            ("work_order_status1", &self.work_order_status1),
            ("acc_name1", &self.acc_name1),
            ("company", &self.company),
            ("job_type1", &self.job_type1),
            ("district_name", &self.district_name),
            ("team_la", &self.team_la),
        ]
        .into_iter()
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Joins validation errors into one message per line.
pub fn describe(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    fn filled() -> WorkOrderForm {
        let mut form = WorkOrderForm::new(today());
        form.wo_num1 = " 1450 ".to_string();
        form.acc_name1 = "شركة الكهرباء".to_string();
        form.job_type1 = Some("صيانة".to_string());
        form.add_item(WorkItem::new("كابل", 2.0, "متر", 10.0));
        form
    }

    #[test]
    fn test_defaults() {
        let form = WorkOrderForm::new(today());
        assert_eq!(form.company, DEFAULT_COMPANY);
        assert_eq!(form.create_date1, "2026-05-04");
        assert_eq!(form.indx_date, "2026-05-04");
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let errors = WorkOrderForm::new(today()).validate().unwrap_err();
        let shown: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            shown,
            vec![
                messages::WO_NUM_REQUIRED,
                messages::CUSTOMER_REQUIRED,
                messages::ITEM_REQUIRED
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_job_type_and_bad_date() {
        let mut form = filled();
        form.job_type1 = Some("ترميم".to_string());
        form.create_date1 = "04/05/2026".to_string();
        let fields: Vec<String> = form.validate().unwrap_err().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["job_type1", "create_date1"]);
    }

    #[test]
    fn test_document_starts_in_initial_status() {
        let form = filled();
        assert!(form.validate().is_ok());

        let doc = form.to_document();
        assert_eq!(doc.get_string("wo_num1").unwrap(), Some("1450"));
        assert_eq!(doc.get_string("workflow_state").unwrap(), Some(INITIAL_STATUS));
        assert_eq!(doc.get_string("work_order_status1").unwrap(), Some(INITIAL_STATUS));
        assert!(!doc.contains("district_name"));

        let items = doc.get_table(ITEMS_FIELD).unwrap().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["total_amount"], 20.0);
        assert_eq!(form.total_amount(), 20.0);
    }

    #[test]
    fn test_remove_item() {
        let mut form = filled();
        assert_eq!(form.remove_item(3), None);
        assert!(form.remove_item(0).is_some());
        assert!(form.items.is_empty());
    }

    #[test]
    fn test_update_only_sends_given_fields() {
        let update = WorkOrderUpdate {
            work_order_status1: Some("مكتمل".to_string()),
            district_name: Some(" الرياض ".to_string()),
            ..WorkOrderUpdate::default()
        };
        assert!(update.validate().is_ok());

        let doc = update.to_document();
        assert_eq!(doc.fields().len(), 2);
        assert_eq!(doc.get_string("district_name").unwrap(), Some("الرياض"));
    }

    #[test]
    fn test_update_validation() {
        assert_eq!(
            WorkOrderUpdate::default().validate().unwrap_err()[0].message,
            messages::NOTHING_TO_UPDATE
        );

        let update = WorkOrderUpdate {
            work_order_status1: Some("done".to_string()),
            acc_name1: Some("  ".to_string()),
            ..WorkOrderUpdate::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(describe(&errors), format!("{}\n{}", messages::UNKNOWN_STATUS, messages::CUSTOMER_REQUIRED));
    }
}
