//! Document retrieval.
//!
//! Invoice and order documents come back as raw bytes (typically PDF); the
//! response body is returned unparsed. The `format` selector and similar
//! options travel as query parameters. Document type metadata is ordinary
//! JSON.

use bytes::Bytes;
use serde_json::Value;

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for document retrieval.
pub struct DocumentsService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> DocumentsService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Retrieves the invoice document for an order.
    pub async fn invoice_by_order_id(
        &self,
        order_id: &str,
        query: &[(String, String)],
    ) -> Unit4Result<Bytes> {
        let database = self
            .client
            .require_database("DocumentsService::invoice_by_order_id")?;
        self.client
            .get_raw(
                &format!("/api/{database}/Documents/Invoice/ByOrderId/{order_id}"),
                query,
            )
            .await
    }

    /// Retrieves an invoice document by invoice ID.
    pub async fn invoice_by_invoice_id(
        &self,
        invoice_id: &str,
        query: &[(String, String)],
    ) -> Unit4Result<Bytes> {
        let database = self
            .client
            .require_database("DocumentsService::invoice_by_invoice_id")?;
        self.client
            .get_raw(&format!("/api/{database}/Documents/Invoice/{invoice_id}"), query)
            .await
    }

    /// Retrieves the order document.
    pub async fn order(&self, order_id: &str, query: &[(String, String)]) -> Unit4Result<Bytes> {
        let database = self.client.require_database("DocumentsService::order")?;
        self.client
            .get_raw(&format!("/api/{database}/Documents/Order/{order_id}"), query)
            .await
    }

    /// Retrieves the web variant of the invoice document for an order.
    pub async fn invoice_by_order_id_for_web(
        &self,
        order_id: &str,
        query: &[(String, String)],
    ) -> Unit4Result<Bytes> {
        let database = self
            .client
            .require_database("DocumentsService::invoice_by_order_id_for_web")?;
        self.client
            .get_raw(
                &format!("/api/{database}/Documents/Invoice/ByOrderIdForWeb/{order_id}"),
                query,
            )
            .await
    }

    /// Retrieves the web variant of an invoice document.
    pub async fn invoice_for_web(
        &self,
        invoice_id: &str,
        query: &[(String, String)],
    ) -> Unit4Result<Bytes> {
        let database = self
            .client
            .require_database("DocumentsService::invoice_for_web")?;
        self.client
            .get_raw(
                &format!("/api/{database}/Documents/Invoice/ForWeb/{invoice_id}"),
                query,
            )
            .await
    }

    /// Lists document types.
    pub async fn type_info_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("DocumentsService::type_info_list")?;
        self.client
            .get(&format!("/api/{database}/DocumentTypeInfoList"), &[])
            .await
    }

    /// Gets info for a single document type.
    pub async fn type_info(&self, document_type: i32) -> Unit4Result<Value> {
        let database = self.client.require_database("DocumentsService::type_info")?;
        self.client
            .get(&format!("/api/{database}/DocumentTypeInfo/{document_type}"), &[])
            .await
    }
}
