use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::CompanyId;
use crate::matching::engine::MatchResult;
use crate::utils::normalize::normalize;

/// An accepted entry could not be turned into a write request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("no account identifier available to write for company {0}")]
    NoIdentifier(CompanyId),

    #[error("account order id for company {0} is empty")]
    EmptyValue(CompanyId),
}

/// A single write against the CRM failed.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("missing CRM credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("company {0} not found in CRM")]
    CompanyNotFound(CompanyId),

    #[error("CRM API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One write request against the CRM: set the account order id field on a
/// single company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLinkUpdate {
    pub company_id: CompanyId,
    pub account_order_id: String,
}

impl AccountLinkUpdate {
    /// Derive the write for an accepted match.
    ///
    /// Value preference: the customer's raw account order id, then its raw
    /// account number, then — for identifier strategies only — the
    /// normalized matched identifier. A name+address match without any
    /// identifier is rejected: there is nothing sensible to write.
    ///
    /// # Errors
    ///
    /// [`ApplyError::NoIdentifier`] when the match carries no writable value.
    pub fn from_match(m: &MatchResult) -> Result<Self, ApplyError> {
        use crate::core::types::MatchStrategy;

        let value = m
            .account_order_id
            .clone()
            .or_else(|| m.account_number.clone())
            .or_else(|| match m.strategy {
                MatchStrategy::AccountNumber | MatchStrategy::AccountOrderId => {
                    Some(m.matched_identifier.clone())
                }
                MatchStrategy::NameAddress => None,
            })
            .ok_or_else(|| ApplyError::NoIdentifier(m.company_id.clone()))?;

        Self::manual(m.company_id.clone(), &value)
    }

    /// Build a write from an operator-entered override. Validated the same
    /// way as engine-produced matches; overrides never bypass the adapter.
    ///
    /// # Errors
    ///
    /// [`ApplyError::EmptyValue`] when the value normalizes to nothing.
    pub fn manual(company_id: CompanyId, account_order_id: &str) -> Result<Self, ApplyError> {
        if normalize(Some(account_order_id)).is_none() {
            return Err(ApplyError::EmptyValue(company_id));
        }
        Ok(Self {
            company_id,
            account_order_id: account_order_id.trim().to_owned(),
        })
    }
}

/// An operator-entered replacement identifier for an unmatched customer's
/// candidate company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub company_id: CompanyId,
    pub account_order_id: String,
}

/// Writes one [`AccountLinkUpdate`] to the external CRM.
///
/// Implementations must be idempotent: writing the same value to the same
/// company twice produces no observable difference beyond the write itself.
/// Each call performs exactly one external write.
pub trait CrmWriter {
    /// # Errors
    ///
    /// Returns a [`WriteError`] describing why this single write failed.
    fn write_account_order_id(&self, update: &AccountLinkUpdate) -> Result<(), WriteError>;
}

/// A writer that logs what it would do and writes nothing.
pub struct DryRunWriter;

impl CrmWriter for DryRunWriter {
    fn write_account_order_id(&self, update: &AccountLinkUpdate) -> Result<(), WriteError> {
        tracing::info!(
            company = %update.company_id,
            value = %update.account_order_id,
            "dry-run: would set account order id"
        );
        Ok(())
    }
}

/// Outcome of one entry in an apply batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStatus {
    /// The write succeeded
    Applied,
    /// The write was attempted and failed
    Failed,
    /// The entry never became a write (validation rejected it)
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub company_id: CompanyId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_order_id: Option<String>,

    pub status: ApplyStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplyOutcome {
    fn applied(update: &AccountLinkUpdate) -> Self {
        Self {
            company_id: update.company_id.clone(),
            account_order_id: Some(update.account_order_id.clone()),
            status: ApplyStatus::Applied,
            error: None,
        }
    }

    fn failed(update: &AccountLinkUpdate, err: &WriteError) -> Self {
        Self {
            company_id: update.company_id.clone(),
            account_order_id: Some(update.account_order_id.clone()),
            status: ApplyStatus::Failed,
            error: Some(err.to_string()),
        }
    }

    fn rejected(company_id: CompanyId, err: &ApplyError) -> Self {
        Self {
            company_id,
            account_order_id: None,
            status: ApplyStatus::Rejected,
            error: Some(err.to_string()),
        }
    }
}

/// Per-entry results of an apply batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub outcomes: Vec<ApplyOutcome>,
    pub applied: usize,
    pub failed: usize,
    pub rejected: usize,
}

impl ApplyReport {
    fn from_outcomes(outcomes: Vec<ApplyOutcome>) -> Self {
        let applied = outcomes
            .iter()
            .filter(|o| o.status == ApplyStatus::Applied)
            .count();
        let failed = outcomes
            .iter()
            .filter(|o| o.status == ApplyStatus::Failed)
            .count();
        let rejected = outcomes
            .iter()
            .filter(|o| o.status == ApplyStatus::Rejected)
            .count();
        Self {
            outcomes,
            applied,
            failed,
            rejected,
        }
    }
}

/// Execute an apply batch: one write per accepted match plus one per manual
/// override, in input order.
///
/// Partial-failure semantics: a failed or rejected entry never aborts the
/// remaining entries; every entry gets an [`ApplyOutcome`] and the caller
/// decides whether to retry.
pub fn apply_matches<W: CrmWriter>(
    writer: &W,
    matches: &[MatchResult],
    overrides: &[ManualOverride],
) -> ApplyReport {
    let mut outcomes = Vec::with_capacity(matches.len() + overrides.len());

    for m in matches {
        match AccountLinkUpdate::from_match(m) {
            Ok(update) => outcomes.push(write_one(writer, &update)),
            Err(err) => outcomes.push(ApplyOutcome::rejected(m.company_id.clone(), &err)),
        }
    }

    for o in overrides {
        match AccountLinkUpdate::manual(o.company_id.clone(), &o.account_order_id) {
            Ok(update) => outcomes.push(write_one(writer, &update)),
            Err(err) => outcomes.push(ApplyOutcome::rejected(o.company_id.clone(), &err)),
        }
    }

    let report = ApplyReport::from_outcomes(outcomes);
    tracing::info!(
        applied = report.applied,
        failed = report.failed,
        rejected = report.rejected,
        "apply batch finished"
    );
    report
}

/// Execute a batch of pre-validated updates.
pub fn apply_updates<W: CrmWriter>(writer: &W, updates: &[AccountLinkUpdate]) -> ApplyReport {
    let outcomes = updates.iter().map(|u| write_one(writer, u)).collect();
    ApplyReport::from_outcomes(outcomes)
}

fn write_one<W: CrmWriter>(writer: &W, update: &AccountLinkUpdate) -> ApplyOutcome {
    match writer.write_account_order_id(update) {
        Ok(()) => ApplyOutcome::applied(update),
        Err(err) => {
            tracing::error!(company = %update.company_id, error = %err, "write failed");
            ApplyOutcome::failed(update, &err)
        }
    }
}
