use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::company::CrmCompany;
use crate::core::customer::ErpCustomer;
use crate::core::types::{CompanyId, Confidence, CustomerId, MatchStrategy};
use crate::index::store::CompanyIndex;
use crate::matching::candidates::find_name_candidate;
use crate::matching::report::{ReconReport, RunSummary, UnmatchedCustomer, UnmatchedReason};

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("customer record at position {0} is missing its id")]
    MissingCustomerId(usize),

    #[error("company record at position {0} is missing its id")]
    MissingCompanyId(usize),
}

/// A proposed link between one customer and one company.
///
/// Names are denormalized display copies captured at match time, independent
/// of later mutation of the source collections. `matched_identifier` is the
/// literal normalized key that produced the join, kept for human review. The
/// raw identifier fields are carried from the customer so the apply step has
/// a value to write back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub company_id: CompanyId,
    pub company_name: String,
    pub strategy: MatchStrategy,
    pub confidence: Confidence,
    pub matched_identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_order_id: Option<String>,
}

impl MatchResult {
    fn new(
        customer: &ErpCustomer,
        company: &CrmCompany,
        strategy: MatchStrategy,
        matched_identifier: String,
    ) -> Self {
        Self {
            customer_id: customer.id.clone(),
            customer_name: customer.display_name().to_owned(),
            company_id: company.id.clone(),
            company_name: company.display_name().to_owned(),
            strategy,
            confidence: strategy.confidence(),
            matched_identifier,
            account_number: customer.account_number.clone(),
            account_order_id: customer.account_order_id.clone(),
        }
    }
}

/// The strategy chain. Borrows a [`CompanyIndex`] and probes it in strict
/// priority order; first hit wins, no scoring across strategies.
pub struct ReconEngine<'a> {
    index: &'a CompanyIndex<'a>,
}

impl<'a> ReconEngine<'a> {
    #[must_use]
    pub fn new(index: &'a CompanyIndex<'a>) -> Self {
        Self { index }
    }

    /// Match a single customer against the index.
    ///
    /// Strategies in priority order: account number, account order id,
    /// name+address composite. Returns `None` when nothing hits.
    #[must_use]
    pub fn match_one(&self, customer: &ErpCustomer) -> Option<MatchResult> {
        use crate::utils::normalize::{name_address_key, normalize};

        if let Some(key) = normalize(customer.account_number.as_deref()) {
            if let Some(company) = self.index.by_account_number(&key) {
                return Some(MatchResult::new(
                    customer,
                    company,
                    MatchStrategy::AccountNumber,
                    key,
                ));
            }
        }

        if let Some(key) = normalize(customer.account_order_id.as_deref()) {
            if let Some(company) = self.index.by_account_order_id(&key) {
                return Some(MatchResult::new(
                    customer,
                    company,
                    MatchStrategy::AccountOrderId,
                    key,
                ));
            }
        }

        if let Some(key) = name_address_key(customer.name.as_deref(), customer.address.as_ref()) {
            if let Some(company) = self.index.by_name_address(&key) {
                return Some(MatchResult::new(
                    customer,
                    company,
                    MatchStrategy::NameAddress,
                    key,
                ));
            }
        }

        None
    }
}

/// Run a full reconciliation: validate ids, build the index, match every
/// customer, and aggregate the report.
///
/// The input collections are only read; all output structures are freshly
/// allocated. Customers without any usable join key are unmatched
/// immediately with no candidate; customers whose keys missed the CRM get a
/// name-containment candidate as a manual-review hint.
///
/// # Errors
///
/// Fails the entire run when any record is missing its id — a partial index
/// would silently misreport the rest.
pub fn reconcile(
    customers: &[ErpCustomer],
    companies: &[CrmCompany],
) -> Result<ReconReport, ReconError> {
    for (pos, customer) in customers.iter().enumerate() {
        if customer.id.is_missing() {
            return Err(ReconError::MissingCustomerId(pos));
        }
    }
    for (pos, company) in companies.iter().enumerate() {
        if company.id.is_missing() {
            return Err(ReconError::MissingCompanyId(pos));
        }
    }

    tracing::info!(
        customers = customers.len(),
        companies = companies.len(),
        "starting reconciliation"
    );

    let index = CompanyIndex::build(companies);
    let engine = ReconEngine::new(&index);

    let mut matches = Vec::new();
    let mut unmatched = Vec::new();

    for customer in customers {
        if let Some(result) = engine.match_one(customer) {
            matches.push(result);
        } else if customer.has_join_keys() {
            let candidate = find_name_candidate(customer, companies);
            unmatched.push(UnmatchedCustomer::new(
                customer.clone(),
                UnmatchedReason::NotFound,
                candidate,
            ));
        } else {
            unmatched.push(UnmatchedCustomer::new(
                customer.clone(),
                UnmatchedReason::NoJoinKeys,
                None,
            ));
        }
    }

    let summary = RunSummary::tally(
        customers.len(),
        companies.len(),
        &matches,
        &unmatched,
        index.collisions().to_vec(),
    );

    tracing::info!(
        matched = summary.matched,
        unmatched = summary.unmatched,
        collisions = summary.collisions.len(),
        "reconciliation complete"
    );

    Ok(ReconReport::new(matches, unmatched, summary))
}
