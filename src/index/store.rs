use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::company::CrmCompany;
use crate::core::types::{CompanyId, MatchStrategy};
use crate::utils::normalize::{name_address_key, normalize};

/// Two companies normalized to the same key in one of the lookup maps.
///
/// The index resolves this with last-write-wins (the later company in
/// iteration order replaces the earlier), which mirrors the data as the
/// source systems currently produce it. Each overwrite is recorded so the
/// run summary can surface the ambiguity for human investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCollision {
    /// Which lookup map collided
    pub field: MatchStrategy,
    /// The shared normalized key
    pub key: String,
    /// The company the index now holds
    pub kept: CompanyId,
    /// The company that was displaced
    pub overwritten: CompanyId,
}

/// Lookup maps over a CRM company collection, keyed by each normalized
/// identifier type.
#[derive(Debug)]
pub struct CompanyIndex<'a> {
    companies: &'a [CrmCompany],
    by_account_number: HashMap<String, usize>,
    by_account_order_id: HashMap<String, usize>,
    by_name_address: HashMap<String, usize>,
    collisions: Vec<IndexCollision>,
}

impl<'a> CompanyIndex<'a> {
    /// Build all three indexes in one O(R) pass over the companies.
    ///
    /// Companies whose identifier normalizes to nothing are skipped for that
    /// map; companies with a partial address are excluded from the
    /// name+address map entirely (no name-only fallback at build time).
    #[must_use]
    pub fn build(companies: &'a [CrmCompany]) -> Self {
        let mut index = Self {
            companies,
            by_account_number: HashMap::new(),
            by_account_order_id: HashMap::new(),
            by_name_address: HashMap::new(),
            collisions: Vec::new(),
        };

        for (pos, company) in companies.iter().enumerate() {
            if let Some(key) = normalize(company.account_number.as_deref()) {
                index.insert(MatchStrategy::AccountNumber, key, pos);
            }
            if let Some(key) = normalize(company.account_order_id.as_deref()) {
                index.insert(MatchStrategy::AccountOrderId, key, pos);
            }
            if let Some(key) = name_address_key(company.name.as_deref(), company.address.as_ref())
            {
                index.insert(MatchStrategy::NameAddress, key, pos);
            }
        }

        if !index.collisions.is_empty() {
            tracing::warn!(
                collisions = index.collisions.len(),
                "ambiguous index keys resolved last-write-wins"
            );
        }

        index
    }

    fn insert(&mut self, field: MatchStrategy, key: String, pos: usize) {
        let previous = match field {
            MatchStrategy::AccountNumber => self.by_account_number.insert(key.clone(), pos),
            MatchStrategy::AccountOrderId => self.by_account_order_id.insert(key.clone(), pos),
            MatchStrategy::NameAddress => self.by_name_address.insert(key.clone(), pos),
        };

        if let Some(prev_pos) = previous {
            self.collisions.push(IndexCollision {
                field,
                key,
                kept: self.companies[pos].id.clone(),
                overwritten: self.companies[prev_pos].id.clone(),
            });
        }
    }

    /// Look up a company by normalized account number.
    #[must_use]
    pub fn by_account_number(&self, key: &str) -> Option<&'a CrmCompany> {
        self.by_account_number.get(key).map(|&i| &self.companies[i])
    }

    /// Look up a company by normalized account order id.
    #[must_use]
    pub fn by_account_order_id(&self, key: &str) -> Option<&'a CrmCompany> {
        self.by_account_order_id
            .get(key)
            .map(|&i| &self.companies[i])
    }

    /// Look up a company by composite name+address key.
    #[must_use]
    pub fn by_name_address(&self, key: &str) -> Option<&'a CrmCompany> {
        self.by_name_address.get(key).map(|&i| &self.companies[i])
    }

    /// Overwrites recorded while building, in insertion order.
    #[must_use]
    pub fn collisions(&self) -> &[IndexCollision] {
        &self.collisions
    }

    /// Number of companies the index was built over.
    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::address::Address;

    #[test]
    fn test_build_indexes_by_identifier() {
        let companies = vec![
            CrmCompany::new("c1").with_account_number("ABC-123"),
            CrmCompany::new("c2").with_account_order_id("4417"),
        ];
        let index = CompanyIndex::build(&companies);

        assert_eq!(
            index.by_account_number("abc123").map(|c| &c.id),
            Some(&CompanyId::new("c1"))
        );
        assert_eq!(
            index.by_account_order_id("4417").map(|c| &c.id),
            Some(&CompanyId::new("c2"))
        );
        assert!(index.by_account_number("4417").is_none());
        assert!(index.collisions().is_empty());
    }

    #[test]
    fn test_blank_identifiers_not_indexed() {
        let companies = vec![CrmCompany::new("c1").with_account_number("  ")];
        let index = CompanyIndex::build(&companies);
        assert!(index.by_account_number("").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_name_address_requires_complete_address() {
        let complete = CrmCompany::new("c1").with_name("Acme Co").with_address(
            Address::new()
                .with_street("1 Main St")
                .with_city("Springfield")
                .with_state("IL")
                .with_postal("62704"),
        );
        let partial = CrmCompany::new("c2")
            .with_name("Partial Inc")
            .with_address(Address::new().with_city("Springfield"));
        let companies = vec![complete, partial];
        let index = CompanyIndex::build(&companies);

        assert!(index
            .by_name_address("acmeco|1main|springfield|il|62704")
            .is_some());
        // the partial-address company appears in no composite key
        assert_eq!(
            index
                .by_name_address("partialinc|springfield")
                .map(|c| &c.id),
            None
        );
    }

    #[test]
    fn test_collision_last_write_wins() {
        let companies = vec![
            CrmCompany::new("c1").with_account_number("X1"),
            CrmCompany::new("c2").with_account_number("x-1"),
        ];
        let index = CompanyIndex::build(&companies);

        // later company displaced the earlier one
        assert_eq!(
            index.by_account_number("x1").map(|c| &c.id),
            Some(&CompanyId::new("c2"))
        );

        let collisions = index.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].field, MatchStrategy::AccountNumber);
        assert_eq!(collisions[0].key, "x1");
        assert_eq!(collisions[0].kept, CompanyId::new("c2"));
        assert_eq!(collisions[0].overwritten, CompanyId::new("c1"));
    }
}
