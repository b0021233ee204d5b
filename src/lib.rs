//! # crm-link
//!
//! A library for linking customer records from an ERP system to company
//! records in a CRM system.
//!
//! When two systems of record grow independently, the same business ends up
//! as a customer in one and a company in the other with no shared key.
//! `crm-link` proposes links between the two collections using exact
//! identifier lookups first and a normalized name+address key as a last
//! resort, annotating every proposed link with the strategy that produced it
//! and a confidence tier.
//!
//! ## Features
//!
//! - **Identifier matching**: exact lookups on normalized account numbers
//!   and account order ids
//! - **Name+address fallback**: composite key over normalized name, street,
//!   city, state, and postal code
//! - **Confidence tiers**: derived from the strategy alone, auditable in one
//!   table
//! - **Review candidates**: loose name-containment hints for unmatched
//!   customers, never applied automatically
//! - **Collision warnings**: ambiguous identifier keys are resolved
//!   last-write-wins and surfaced in the run summary
//! - **Write-back**: accepted links can be pushed to the CRM so future runs
//!   match by identifier
//!
//! ## Example
//!
//! ```
//! use crm_link::{reconcile, CrmCompany, ErpCustomer};
//!
//! let customers = vec![ErpCustomer::new("fb-1001")
//!     .with_name("Acme Co")
//!     .with_account_number("ABC-123")];
//! let companies = vec![CrmCompany::new("88412")
//!     .with_name("Acme Co")
//!     .with_account_number("abc123")];
//!
//! let report = reconcile(&customers, &companies).unwrap();
//! assert_eq!(report.summary.matched, 1);
//! assert_eq!(report.matches[0].matched_identifier, "abc123");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Entity and match metadata types
//! - [`index`]: Lookup maps over the CRM collection
//! - [`matching`]: Strategy chain, candidates, and reporting
//! - [`apply`]: Write-back adapter and batch executor
//! - [`parsing`]: JSON dataset loading for the CLI
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON API server for the two operations

pub mod apply;
pub mod cli;
pub mod core;
pub mod index;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use apply::adapter::{
    apply_matches, apply_updates, AccountLinkUpdate, ApplyReport, CrmWriter, ManualOverride,
};
pub use core::address::Address;
pub use core::company::CrmCompany;
pub use core::customer::ErpCustomer;
pub use core::types::{CompanyId, Confidence, CustomerId, MatchStrategy};
pub use index::store::CompanyIndex;
pub use matching::engine::{reconcile, MatchResult, ReconEngine, ReconError};
pub use matching::report::{ReconReport, RunSummary, UnmatchedCustomer};
