//! Mail and report template operations.

use serde_json::Value;

use crate::client::Unit4Client;
use crate::errors::Unit4Result;
use crate::transport::HttpTransport;

/// Service for mail message and template configuration operations.
pub struct TemplatesService<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> TemplatesService<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Lists mail messages.
    pub async fn mail_message_info_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("TemplatesService::mail_message_info_list")?;
        self.client
            .get(&format!("/api/{database}/MailMessageInfoList"), &[])
            .await
    }

    /// Lists mail templates.
    pub async fn mail_template_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("TemplatesService::mail_template_list")?;
        self.client
            .get(&format!("/api/{database}/MailTemplateList"), &[])
            .await
    }

    /// Gets a report template configuration.
    pub async fn report_template_configuration(&self, config_id: &str) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("TemplatesService::report_template_configuration")?;
        self.client
            .get(
                &format!("/api/{database}/ReportTemplateConfiguration/{config_id}"),
                &[],
            )
            .await
    }

    /// Lists report template configurations.
    pub async fn report_template_configuration_list(&self) -> Unit4Result<Value> {
        let database = self
            .client
            .require_database("TemplatesService::report_template_configuration_list")?;
        self.client
            .get(&format!("/api/{database}/ReportTemplateConfigurationList"), &[])
            .await
    }
}
