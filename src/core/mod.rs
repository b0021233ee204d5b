//! Core data types for customers, companies, and match metadata.
//!
//! - [`ErpCustomer`]: a customer record from the ERP side
//! - [`CrmCompany`]: a company record from the CRM side
//! - [`Address`]: optional structured address, a last-resort join key
//! - [`MatchStrategy`] / [`Confidence`]: closed enums for match metadata
//!
//! Both entity types are plain serde structs with optional fields; only the
//! id is required. Ids tolerate numeric JSON values because the upstream
//! systems export them inconsistently.

pub mod address;
pub mod company;
pub mod customer;
pub mod types;

pub use address::Address;
pub use company::CrmCompany;
pub use customer::ErpCustomer;
pub use types::{CompanyId, Confidence, CustomerId, MatchStrategy};
