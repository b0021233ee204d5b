//! The apply boundary: pushing accepted links back to the CRM.
//!
//! The engine proposes matches; applying them means one external write per
//! entry, setting the company's account order id so future runs link by
//! identifier. This module defines the write contract and the batch
//! executor:
//!
//! - [`CrmWriter`]: one idempotent write per invocation
//! - [`AccountLinkUpdate`]: the write request, built from a match or a
//!   manual operator override — both validated identically
//! - [`apply_matches`] / [`apply_updates`]: batch execution with
//!   partial-failure semantics (failures are collected, never fatal)
//! - [`CopperWriter`]: the Copper HTTP implementation
//! - [`DryRunWriter`]: logs instead of writing
//!
//! Entries are independent (each keyed by a distinct company id), so callers
//! may dispatch them concurrently against the CRM's rate limit; this module
//! imposes no ordering and performs no retry — that belongs to the caller's
//! network layer.

pub mod adapter;
pub mod copper;

pub use adapter::{
    apply_matches, apply_updates, AccountLinkUpdate, ApplyError, ApplyOutcome, ApplyReport,
    ApplyStatus, CrmWriter, DryRunWriter, ManualOverride, WriteError,
};
pub use copper::{CopperConfig, CopperWriter};
