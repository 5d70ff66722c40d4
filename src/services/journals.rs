//! Journal operations.

use serde_json::Value;

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for journal operations.
pub struct JournalsService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> JournalsService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Lists journal info.
    pub async fn info_list(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("JournalsService::info_list")?;
        self.client
            .get(&format!("/api/{database}/JournalInfoList"), &[])
            .await
    }

    /// Lists journal transactions for a journal and fiscal year.
    pub async fn transaction_info_list(
        &self,
        journal_id: &str,
        fiscal_year: i32,
    ) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("JournalsService::transaction_info_list")?;
        self.client
            .get(
                &format!("/api/{database}/JournalTransactionInfoList/{journal_id}/{fiscal_year}"),
                &[],
            )
            .await
    }

    /// Journal type code/label pairs.
    pub async fn type_nvl(&self) -> Unit4Result<Value> {
        let database = self.client.require_database("JournalsService::type_nvl")?;
        self.client
            .get(&format!("/api/{database}/JournalTypeNVL"), &[])
            .await
    }
}
