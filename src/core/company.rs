use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::types::CompanyId;

/// A company record from the CRM side (the "right" system of record).
///
/// `account_number` and `account_order_id` mirror the customer-side
/// identifiers; `account_order_id` is the field the apply adapter writes back
/// to when an operator links a previously-unmatched customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmCompany {
    pub id: CompanyId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        alias = "accountNumber",
        deserialize_with = "crate::core::types::opt_flexible_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_number: Option<String>,

    #[serde(
        default,
        alias = "accountOrderId",
        deserialize_with = "crate::core::types::opt_flexible_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_order_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl CrmCompany {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: CompanyId::new(id),
            name: None,
            account_number: None,
            account_order_id: None,
            address: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    #[must_use]
    pub fn with_account_order_id(mut self, account_order_id: impl Into<String>) -> Self {
        self.account_order_id = Some(account_order_id.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Display name, empty when the record has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_id() {
        let json = r#"{"id": 88412, "name": "Acme Co", "accountNumber": "abc123"}"#;
        let company: CrmCompany = serde_json::from_str(json).unwrap();
        assert_eq!(company.id, CompanyId::new("88412"));
        assert_eq!(company.account_number.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let json = serde_json::to_string(&CrmCompany::new("88412")).unwrap();
        assert!(!json.contains("account_number"));
        assert!(!json.contains("address"));
    }
}
