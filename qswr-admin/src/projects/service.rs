//! Work order calls against the backend.

use frappe_lib::FrappeClient;
use frappe_lib::api::ListQuery;
use frappe_lib::api::Order;
use frappe_lib::error::Error;
use frappe_lib::model::Document;

use super::constants::DOCTYPE;
use super::constants::LIST_FIELDS;
use super::constants::LIST_LIMIT;
use super::form::WorkOrderForm;
use super::form::WorkOrderUpdate;
use super::model::WorkOrder;

/// Outcome of deleting several work orders one after another.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, Error)>,
}

impl DeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Work order operations for one backend.
#[derive(Debug, Clone)]
pub struct ProjectService {
    client: FrappeClient,
}

impl ProjectService {
    pub fn new(client: FrappeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FrappeClient {
        &self.client
    }

    /// The query behind the projects table: the table fields of the newest
    /// [`LIST_LIMIT`] work orders.
    pub fn list_query() -> ListQuery {
        ListQuery::new()
            .fields(LIST_FIELDS)
            .order_by("modified", Order::Desc)
            .limit(LIST_LIMIT)
    }

    pub async fn list(&self) -> Result<Vec<WorkOrder>, Error> {
        let docs = self.client.get_list(DOCTYPE, &Self::list_query()).await?;
        docs.into_iter().map(WorkOrder::from_document).collect()
    }

    /// Number of work orders on the backend, beyond the fetched page.
    pub async fn count(&self) -> Result<u64, Error> {
        self.client.get_count(DOCTYPE, &[]).await
    }

    /// The full document, child rows included.
    pub async fn get(&self, name: &str) -> Result<Document, Error> {
        self.client.get_doc(DOCTYPE, name).await
    }

    pub async fn create(&self, form: &WorkOrderForm) -> Result<WorkOrder, Error> {
        let mut doc = form.to_document();
        doc.insert("doctype", DOCTYPE);
        let created = self.client.create_doc(DOCTYPE, &doc).await?;
        WorkOrder::from_document(created)
    }

    pub async fn update(&self, name: &str, update: &WorkOrderUpdate) -> Result<WorkOrder, Error> {
        let updated = self
            .client
            .update_doc(DOCTYPE, name, &update.to_document())
            .await?;
        WorkOrder::from_document(updated)
    }

    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        self.client.delete_doc(DOCTYPE, name).await
    }

    /// Deletes each name in turn. A failure does not stop the rest.
    pub async fn delete_many(&self, names: &[String]) -> DeleteReport {
        let mut report = DeleteReport::default();
        for name in names {
            match self.delete(name).await {
                Ok(()) => report.deleted.push(name.clone()),
                Err(e) => {
                    log::warn!("failed to delete {}: {}", name, e);
                    report.failed.push((name.clone(), e));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_list_query() {
        let pairs = ProjectService::list_query().to_query_pairs();

        let fields: Vec<String> = serde_json::from_str(get(&pairs, "fields").unwrap()).unwrap();
        assert_eq!(fields, LIST_FIELDS);
        assert_eq!(get(&pairs, "limit_page_length"), Some("100"));
        assert_eq!(get(&pairs, "order_by"), Some("modified desc"));
        assert_eq!(get(&pairs, "as_dict"), Some("1"));
    }
}
