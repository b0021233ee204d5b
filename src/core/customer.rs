use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::types::CustomerId;
use crate::utils::normalize::{name_address_key, normalize};

/// A customer record from the ERP side (the "left" system of record).
///
/// Only `id` is required. The two account identifiers live in distinct
/// namespaces: `account_number` is the primary join key, `account_order_id`
/// the secondary. The address is a last-resort join key and only counts when
/// fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpCustomer {
    pub id: CustomerId,

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

impl ErpCustomer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(id),
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

    /// True when at least one of the three join keys is usable: a normalized
    /// account number, a normalized account order id, or a complete
    /// name+address composite. Customers without any join key are unmatched
    /// immediately and get no review candidate.
    #[must_use]
    pub fn has_join_keys(&self) -> bool {
        normalize(self.account_number.as_deref()).is_some()
            || normalize(self.account_order_id.as_deref()).is_some()
            || name_address_key(self.name.as_deref(), self.address.as_ref()).is_some()
    }
}
