//! Product operations.

use serde_json::Value;

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for product operations.
pub struct ProductsService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> ProductsService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Lists product info, optionally filtered.
    pub async fn info_list(&self, query: &[(String, String)]) -> Unit4Result<Value> {
        let database = self.client.require_database("ProductsService::info_list")?;
        self.client
            .get(&format!("/api/{database}/ProductInfoList"), query)
            .await
    }

    /// Creates a product.
    pub async fn create(&self, data: Value) -> Unit4Result<Value> {
        let database = self.client.require_database("ProductsService::create")?;
        self.client
            .post(&format!("/api/{database}/Product"), data, &[])
            .await
    }

    /// Gets a product by ID.
    pub async fn get(&self, product_id: &str) -> Unit4Result<Value> {
        let database = self.client.require_database("ProductsService::get")?;
        self.client
            .get(&format!("/api/{database}/Product/{product_id}"), &[])
            .await
    }
}
