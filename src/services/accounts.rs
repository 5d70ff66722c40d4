//! Account and bookkeeping period operations.

use serde_json::Value;

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for account and fiscal period operations.
pub struct AccountsService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> AccountsService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Lists account info for a fiscal year.
    pub async fn info_list(&self, fiscal_year: i32) -> Unit4Result<Value> {
        let database = self.client.require_database("AccountsService::info_list")?;
        self.client
            .get(&format!("/api/{database}/AccountInfoList/{fiscal_year}"), &[])
            .await
    }

    /// Account category code/label pairs.
    pub async fn category_nvl(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("AccountsService::category_nvl")?;
        self.client
            .get(&format!("/api/{database}/AccountCategoryNVL"), &[])
            .await
    }

    /// Account manager code/label pairs.
    pub async fn manager_nvl(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("AccountsService::manager_nvl")?;
        self.client
            .get(&format!("/api/{database}/AccountManagerNVL"), &[])
            .await
    }

    /// Lists fiscal years.
    pub async fn fiscal_year_info_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("AccountsService::fiscal_year_info_list")?;
        self.client
            .get(&format!("/api/{database}/FiscalYearInfoList"), &[])
            .await
    }

    /// Lists bookkeeping periods.
    pub async fn period_info_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("AccountsService::period_info_list")?;
        self.client
            .get(&format!("/api/{database}/PeriodInfoList"), &[])
            .await
    }

    /// Lists payment conditions.
    pub async fn payment_condition_info_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("AccountsService::payment_condition_info_list")?;
        self.client
            .get(&format!("/api/{database}/PaymentConditionInfoList"), &[])
            .await
    }
}
