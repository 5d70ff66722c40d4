//! Customer, contact person and address operations.

use serde_json::Value;

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for customer operations.
pub struct CustomersService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> CustomersService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Lists customer info.
    pub async fn info_list(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("CustomersService::info_list")?;
        self.client
            .get(&format!("/api/{database}/CustomerInfoList"), &[])
            .await
    }

    /// Gets a customer by ID.
    pub async fn get(&self, customer_id: &str) -> Unit4Result<Value> {
        let database = self.client.require_database("CustomersService::get")?;
        self.client
            .get(&format!("/api/{database}/Customer/{customer_id}"), &[])
            .await
    }

    /// Creates a customer.
    pub async fn create(&self, data: Value) -> Unit4Result<Value> {
        let database = self.client.require_database("CustomersService::create")?;
        self.client
            .post(&format!("/api/{database}/Customer"), data, &[])
            .await
    }

    /// Deletes a customer.
    pub async fn delete(&self, customer_id: &str) -> Unit4Result<Value> {
        let database = self.client.require_database("CustomersService::delete")?;
        self.client
            .delete(&format!("/api/{database}/Customer/{customer_id}"), &[])
            .await
    }

    /// Lists company contact persons.
    pub async fn company_contact_person_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("CustomersService::company_contact_person_list")?;
        self.client
            .get(&format!("/api/{database}/CompanyContactPersonList"), &[])
            .await
    }

    /// Lists addresses for an organization.
    pub async fn address_list(&self, organization_id: &str) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("CustomersService::address_list")?;
        self.client
            .get(&format!("/api/{database}/AddressList/{organization_id}"), &[])
            .await
    }

    /// Creates an address.
    pub async fn create_address(&self, data: Value) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("CustomersService::create_address")?;
        self.client
            .post(&format!("/api/{database}/Address"), data, &[])
            .await
    }
}
