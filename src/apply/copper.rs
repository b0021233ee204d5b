//! Copper-flavored HTTP writer.
//!
//! Copper stores the account order id in a custom field, so the write is a
//! `PUT /companies/{id}` carrying a `custom_fields` payload. Credentials are
//! the usual Copper developer-API header trio.

use std::time::Duration;

use crate::apply::adapter::{AccountLinkUpdate, CrmWriter, WriteError};

/// Default Copper developer API base.
pub const DEFAULT_API_BASE: &str = "https://api.copper.com/developer_api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`CopperWriter`], normally read from the environment:
///
/// - `COPPER_API_KEY` (required)
/// - `COPPER_USER_EMAIL` (required)
/// - `COPPER_API_BASE` (optional, defaults to the hosted developer API)
/// - `COPPER_ORDER_ID_FIELD` (required, the custom field definition id that
///   holds the account order id)
/// - `COPPER_ACTIVE_FIELD` (optional, a checkbox field to tick on write)
#[derive(Debug, Clone)]
pub struct CopperConfig {
    pub base_url: String,
    pub api_key: String,
    pub user_email: String,
    pub order_id_field: u64,
    pub active_field: Option<u64>,
}

impl CopperConfig {
    /// # Errors
    ///
    /// [`WriteError::MissingCredentials`] when a required variable is unset
    /// or unparseable.
    pub fn from_env() -> Result<Self, WriteError> {
        let api_key = require_env("COPPER_API_KEY")?;
        let user_email = require_env("COPPER_USER_EMAIL")?;
        let order_id_field = require_env("COPPER_ORDER_ID_FIELD")?
            .parse()
            .map_err(|_| WriteError::MissingCredentials("COPPER_ORDER_ID_FIELD"))?;
        let base_url =
            std::env::var("COPPER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_owned());
        let active_field = std::env::var("COPPER_ACTIVE_FIELD")
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            base_url,
            api_key,
            user_email,
            order_id_field,
            active_field,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, WriteError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(WriteError::MissingCredentials(name)),
    }
}

/// Writes account order ids to Copper companies over HTTP.
///
/// A `PUT` with an unchanged field value is a no-op on the Copper side, so
/// repeated writes of the same value satisfy the adapter's idempotence
/// contract.
pub struct CopperWriter {
    config: CopperConfig,
    client: reqwest::blocking::Client,
}

impl CopperWriter {
    /// # Errors
    ///
    /// Returns a [`WriteError`] if the HTTP client cannot be constructed.
    pub fn new(config: CopperConfig) -> Result<Self, WriteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }

    /// Construct directly from the environment.
    ///
    /// # Errors
    ///
    /// See [`CopperConfig::from_env`] and [`CopperWriter::new`].
    pub fn from_env() -> Result<Self, WriteError> {
        Self::new(CopperConfig::from_env()?)
    }

    fn payload(&self, update: &AccountLinkUpdate) -> serde_json::Value {
        let mut custom_fields = vec![serde_json::json!({
            "custom_field_definition_id": self.config.order_id_field,
            "value": update.account_order_id,
        })];
        if let Some(active_field) = self.config.active_field {
            custom_fields.push(serde_json::json!({
                "custom_field_definition_id": active_field,
                "value": "checked",
            }));
        }
        serde_json::json!({ "custom_fields": custom_fields })
    }
}

impl CrmWriter for CopperWriter {
    fn write_account_order_id(&self, update: &AccountLinkUpdate) -> Result<(), WriteError> {
        let url = format!("{}/companies/{}", self.config.base_url, update.company_id);

        tracing::info!(
            company = %update.company_id,
            value = %update.account_order_id,
            "updating account order id in Copper"
        );

        let response = self
            .client
            .put(&url)
            .header("X-PW-AccessToken", &self.config.api_key)
            .header("X-PW-Application", "developer_api")
            .header("X-PW-UserEmail", &self.config.user_email)
            .json(&self.payload(update))
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // The stored company id may be stale; only this entry fails
            return Err(WriteError::CompanyNotFound(update.company_id.clone()));
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(WriteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CompanyId;

    fn test_config() -> CopperConfig {
        CopperConfig {
            base_url: DEFAULT_API_BASE.to_owned(),
            api_key: "key".to_owned(),
            user_email: "ops@example.com".to_owned(),
            order_id_field: 698_467,
            active_field: Some(712_751),
        }
    }

    #[test]
    fn test_payload_shape() {
        let writer = CopperWriter::new(test_config()).unwrap();
        let update = AccountLinkUpdate {
            company_id: CompanyId::new("88412"),
            account_order_id: "4417".to_owned(),
        };
        let payload = writer.payload(&update);
        let fields = payload["custom_fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["custom_field_definition_id"], 698_467);
        assert_eq!(fields[0]["value"], "4417");
        assert_eq!(fields[1]["value"], "checked");
    }

    #[test]
    fn test_payload_without_active_field() {
        let mut config = test_config();
        config.active_field = None;
        let writer = CopperWriter::new(config).unwrap();
        let update = AccountLinkUpdate {
            company_id: CompanyId::new("88412"),
            account_order_id: "4417".to_owned(),
        };
        let fields = writer.payload(&update)["custom_fields"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(fields, 1);
    }
}
