//! Lookup indexes over the CRM company collection.
//!
//! [`CompanyIndex`] is built once per right-hand snapshot and makes every
//! strategy probe O(1). It borrows the company slice and is an explicit,
//! caller-owned value: hosts that re-run matching interactively can keep one
//! alive per snapshot instead of rebuilding it.

pub mod store;

pub use store::{CompanyIndex, IndexCollision};
