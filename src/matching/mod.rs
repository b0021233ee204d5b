//! The reconciliation engine: strategy chain, candidates, and reporting.
//!
//! - [`ReconEngine`]: probes the company index per customer, in strict
//!   priority order (account number, account order id, name+address)
//! - [`reconcile`]: one-shot entry point — validate, index, match, aggregate
//! - [`candidates`]: name-containment review hints for unmatched customers
//! - [`report`]: [`ReconReport`], [`RunSummary`], and unmatched bookkeeping
//!
//! First hit wins; there is no scoring across strategies. Confidence is a
//! fixed function of the strategy (see
//! [`MatchStrategy::confidence`](crate::core::types::MatchStrategy::confidence)).
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

pub mod candidates;
pub mod engine;
pub mod report;

pub use engine::{reconcile, MatchResult, ReconEngine, ReconError};
pub use report::{ReconReport, RunSummary, UnmatchedCustomer, UnmatchedReason};
