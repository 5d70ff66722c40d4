//! Order operations, including order commands and NVL lookups.

use serde_json::{json, Value};

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for order operations.
pub struct OrdersService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> OrdersService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Creates an order.
    pub async fn create(&self, data: Value) -> Unit4Result<Value> {
        let database = self.client.require_database("OrdersService::create")?;
        self.client
            .post(&format!("/api/{database}/Order"), data, &[])
            .await
    }

    /// Gets an order by ID.
    pub async fn get(&self, order_id: &str) -> Unit4Result<Value> {
        let database = self.client.require_database("OrdersService::get")?;
        self.client
            .get(&format!("/api/{database}/Order/{order_id}"), &[])
            .await
    }

    /// Lists open orders.
    pub async fn open_orders(&self, query: &[(String, String)]) -> Unit4Result<Value> {
        let database = self.client.require_database("OrdersService::open_orders")?;
        self.client
            .get(&format!("/api/{database}/OrderInfoList/OpenOrders"), query)
            .await
    }

    /// Lists orders ready to have their invoice printed.
    pub async fn ready_to_print_invoice(&self, query: &[(String, String)]) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("OrdersService::ready_to_print_invoice")?;
        self.client
            .get(
                &format!("/api/{database}/OrderInfoList/OrdersReadyToPrintInvoice"),
                query,
            )
            .await
    }

    /// Processes an order command. The command arguments travel as query
    /// parameters; the body is empty.
    pub async fn process_command(&self, query: &[(String, String)]) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("OrdersService::process_command")?;
        self.client
            .post(&format!("/api/{database}/ProcessOrderCommand"), json!({}), query)
            .await
    }

    /// Retrieves a shipping order document command.
    pub async fn shipping_document_command(
        &self,
        query: &[(String, String)],
    ) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("OrdersService::shipping_document_command")?;
        self.client
            .get(
                &format!("/api/{database}/GetShippingOrderDocumentCommand"),
                query,
            )
            .await
    }

    /// Order state code/label pairs.
    pub async fn state_nvl(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("OrdersService::state_nvl")?;
        self.client
            .get(&format!("/api/{database}/OrderStateNVL"), &[])
            .await
    }

    /// Order type code/label pairs.
    pub async fn type_nvl(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("OrdersService::type_nvl")?;
        self.client
            .get(&format!("/api/{database}/OrderTypeNVL"), &[])
            .await
    }

    /// Order line type code/label pairs.
    pub async fn line_type_nvl(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("OrdersService::line_type_nvl")?;
        self.client
            .get(&format!("/api/{database}/OrderLineTypeNVL"), &[])
            .await
    }
}
