//! Customer invoice operations.

use serde_json::Value;

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for customer invoice operations.
pub struct InvoicesService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> InvoicesService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Creates a customer invoice.
    pub async fn create(&self, data: Value) -> Unit4Result<Value> {
        let database = self.client.require_database("InvoicesService::create")?;
        self.client
            .post(&format!("/api/{database}/CustomerInvoice"), data, &[])
            .await
    }

    /// Lists customer invoice info for a fiscal year and invoice state.
    pub async fn info_list_by_fiscal_year(
        &self,
        fiscal_year: i32,
        invoice_state: i32,
    ) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("InvoicesService::info_list_by_fiscal_year")?;
        self.client
            .get(
                &format!(
                    "/api/{database}/CustomerInvoiceInfoList/ByFiscalYear/{fiscal_year}/{invoice_state}"
                ),
                &[],
            )
            .await
    }
}
