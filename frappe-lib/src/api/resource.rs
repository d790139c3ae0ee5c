//! Document CRUD on `/api/resource/{doctype}`

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use super::ListQuery;
use super::query::encode_filters;
use super::query::Filter;
use crate::FrappeClient;
use crate::error::Error;
use crate::model::DocType;
use crate::model::Document;

/// `{"data": ...}` envelope used by the resource API.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// `{"message": ...}` envelope used by the method API.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope<T> {
    pub(crate) message: T,
}

fn resource_path(doctype: &DocType, name: Option<&str>) -> String {
    match name {
        Some(name) => format!(
            "/api/resource/{}/{}",
            doctype.path_segment(),
            urlencoding::encode(name)
        ),
        None => format!("/api/resource/{}", doctype.path_segment()),
    }
}

impl FrappeClient {
    /// Fetches a single document by name.
    pub async fn get_doc(&self, doctype: impl Into<DocType>, name: &str) -> Result<Document, Error> {
        let doctype = doctype.into();
        let url = self.build_url(&resource_path(&doctype, Some(name)), &[])?;
        let envelope: DataEnvelope<Document> = self.send_json(Method::GET, url, None).await?;
        Ok(envelope.data)
    }

    /// Lists documents of a DocType.
    pub async fn get_list(
        &self,
        doctype: impl Into<DocType>,
        query: &ListQuery,
    ) -> Result<Vec<Document>, Error> {
        let doctype = doctype.into();
        let url = self.build_url(&resource_path(&doctype, None), &query.to_query_pairs())?;
        let envelope: DataEnvelope<Vec<Document>> = self.send_json(Method::GET, url, None).await?;
        log::debug!("fetched {} {} documents", envelope.data.len(), doctype);
        Ok(envelope.data)
    }

    /// Counts documents matching `filters` via `frappe.client.get_count`.
    pub async fn get_count(&self, doctype: impl Into<DocType>, filters: &[Filter]) -> Result<u64, Error> {
        let doctype = doctype.into();
        let mut query = vec![("doctype".to_string(), doctype.name().to_string())];
        if let Some(filters) = encode_filters(filters) {
            query.push(("filters".to_string(), filters));
        }
        let url = self.build_url("/api/method/frappe.client.get_count", &query)?;
        let envelope: MessageEnvelope<u64> = self.send_json(Method::GET, url, None).await?;
        Ok(envelope.message)
    }

    /// Creates a document and returns it as stored by the server.
    pub async fn create_doc(&self, doctype: impl Into<DocType>, doc: &Document) -> Result<Document, Error> {
        let doctype = doctype.into();
        let url = self.build_url(&resource_path(&doctype, None), &[])?;
        let body = serde_json::to_value(doc)?;
        let envelope: DataEnvelope<Document> = self.send_json(Method::POST, url, Some(&body)).await?;
        log::info!(
            "created {} {}",
            doctype,
            envelope.data.name().unwrap_or("<unnamed>")
        );
        Ok(envelope.data)
    }

    /// Updates the given fields of a document and returns the full document.
    pub async fn update_doc(
        &self,
        doctype: impl Into<DocType>,
        name: &str,
        changes: &Document,
    ) -> Result<Document, Error> {
        let doctype = doctype.into();
        let url = self.build_url(&resource_path(&doctype, Some(name)), &[])?;
        let body = serde_json::to_value(changes)?;
        let envelope: DataEnvelope<Document> = self.send_json(Method::PUT, url, Some(&body)).await?;
        log::info!("updated {} {}", doctype, name);
        Ok(envelope.data)
    }

    /// Deletes a document.
    pub async fn delete_doc(&self, doctype: impl Into<DocType>, name: &str) -> Result<(), Error> {
        let doctype = doctype.into();
        let url = self.build_url(&resource_path(&doctype, Some(name)), &[])?;
        // Frappe answers {"message": "ok"} or {"data": "ok"} depending on version.
        let _: Value = self.send_json(Method::DELETE, url, None).await?;
        log::info!("deleted {} {}", doctype, name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path_encoding() {
        let doctype = DocType::new("work_order_list");
        assert_eq!(resource_path(&doctype, None), "/api/resource/work_order_list");
        assert_eq!(
            resource_path(&DocType::new("Sales Invoice"), Some("SINV/0001")),
            "/api/resource/Sales%20Invoice/SINV%2F0001"
        );
    }
}
