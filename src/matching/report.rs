use serde::{Deserialize, Serialize};

use crate::core::company::CrmCompany;
use crate::core::customer::ErpCustomer;
use crate::core::types::{CompanyId, Confidence, MatchStrategy};
use crate::index::store::IndexCollision;
use crate::matching::engine::MatchResult;

/// Why a customer ended up unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// No usable join key at all: no identifier normalized to anything and
    /// the address was absent or partial. Nothing to search with.
    NoJoinKeys,
    /// Had at least one join key but nothing in the CRM matched it.
    NotFound,
}

/// A customer no strategy could link, with an optional review candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedCustomer {
    pub customer: ErpCustomer,
    pub reason: UnmatchedReason,

    /// Loose name-containment suggestion, for manual resolution only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_company_id: Option<CompanyId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_company_name: Option<String>,

    /// Always [`Confidence::NAME_ONLY_CANDIDATE`] when a candidate is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_confidence: Option<Confidence>,
}

impl UnmatchedCustomer {
    #[must_use]
    pub fn new(
        customer: ErpCustomer,
        reason: UnmatchedReason,
        candidate: Option<&CrmCompany>,
    ) -> Self {
        Self {
            customer,
            reason,
            candidate_company_id: candidate.map(|c| c.id.clone()),
            candidate_company_name: candidate.map(|c| c.display_name().to_owned()),
            candidate_confidence: candidate.map(|_| Confidence::NAME_ONLY_CANDIDATE),
        }
    }
}

/// Matches broken down by the strategy that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCounts {
    pub account_number: usize,
    pub account_order_id: usize,
    pub name_address: usize,
}

impl StrategyCounts {
    fn record(&mut self, strategy: MatchStrategy) {
        match strategy {
            MatchStrategy::AccountNumber => self.account_number += 1,
            MatchStrategy::AccountOrderId => self.account_order_id += 1,
            MatchStrategy::NameAddress => self.name_address += 1,
        }
    }
}

/// Unmatched customers broken down by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedCounts {
    pub no_join_keys: usize,
    pub not_found: usize,
}

/// Read-only tallies for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_customers: usize,
    pub total_companies: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub by_strategy: StrategyCounts,
    pub unmatched_by_reason: UnmatchedCounts,

    /// Ambiguous index keys resolved last-write-wins while building the
    /// lookup maps; surfaced here so a human can investigate data quality.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<IndexCollision>,
}

impl RunSummary {
    /// Pure tally over the outputs of a single run. The company total is
    /// supplied by the caller since it is not derivable from the outputs.
    #[must_use]
    pub fn tally(
        total_customers: usize,
        total_companies: usize,
        matches: &[MatchResult],
        unmatched: &[UnmatchedCustomer],
        collisions: Vec<IndexCollision>,
    ) -> Self {
        let mut by_strategy = StrategyCounts::default();
        for m in matches {
            by_strategy.record(m.strategy);
        }

        let mut unmatched_by_reason = UnmatchedCounts::default();
        for u in unmatched {
            match u.reason {
                UnmatchedReason::NoJoinKeys => unmatched_by_reason.no_join_keys += 1,
                UnmatchedReason::NotFound => unmatched_by_reason.not_found += 1,
            }
        }

        Self {
            total_customers,
            total_companies,
            matched: matches.len(),
            unmatched: unmatched.len(),
            by_strategy,
            unmatched_by_reason,
            collisions,
        }
    }
}

/// The full output of one reconciliation run. JSON-serializable end to end,
/// suitable for an HTTP response or direct rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconReport {
    /// RFC 3339 stamp of when the run finished
    pub generated_at: String,
    pub matches: Vec<MatchResult>,
    pub unmatched: Vec<UnmatchedCustomer>,
    pub summary: RunSummary,
}

impl ReconReport {
    #[must_use]
    pub fn new(
        matches: Vec<MatchResult>,
        unmatched: Vec<UnmatchedCustomer>,
        summary: RunSummary,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            matches,
            unmatched,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_empty_run() {
        let summary = RunSummary::tally(0, 0, &[], &[], Vec::new());
        assert_eq!(summary.matched, 0);
        assert_eq!(summary.unmatched, 0);
        assert_eq!(summary.by_strategy, StrategyCounts::default());
    }

    #[test]
    fn test_unmatched_candidate_fields() {
        let company = CrmCompany::new("R1").with_name("Acme Co");
        let u = UnmatchedCustomer::new(
            ErpCustomer::new("L1").with_name("Acme"),
            UnmatchedReason::NotFound,
            Some(&company),
        );
        assert_eq!(u.candidate_company_id, Some(CompanyId::new("R1")));
        assert_eq!(u.candidate_company_name.as_deref(), Some("Acme Co"));
        assert_eq!(u.candidate_confidence, Some(Confidence::Low));
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let matches = Vec::new();
        let unmatched = vec![UnmatchedCustomer::new(
            ErpCustomer::new("L1"),
            UnmatchedReason::NoJoinKeys,
            None,
        )];
        let summary = RunSummary::tally(1, 0, &matches, &unmatched, Vec::new());
        let report = ReconReport::new(matches, unmatched, summary);

        let json = serde_json::to_string(&report).unwrap();
        let back: ReconReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
