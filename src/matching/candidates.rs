use crate::core::company::CrmCompany;
use crate::core::customer::ErpCustomer;
use crate::utils::normalize::normalize;

/// Find a possible company for an unmatched customer by name containment.
///
/// Case-insensitive substring comparison of normalized names, in either
/// direction ("Windy City Supply" suggests "Windy City Supply Co" and vice
/// versa). First company in iteration order wins, which keeps the hint
/// deterministic for a fixed input.
///
/// This is a manual-review hint only. It never produces a [`MatchResult`]
/// and is never applied automatically.
///
/// [`MatchResult`]: crate::matching::engine::MatchResult
#[must_use]
pub fn find_name_candidate<'a>(
    customer: &ErpCustomer,
    companies: &'a [CrmCompany],
) -> Option<&'a CrmCompany> {
    let needle = normalize(customer.name.as_deref())?;
    companies.iter().find(|company| {
        normalize(company.name.as_deref())
            .is_some_and(|hay| hay.contains(&needle) || needle.contains(&hay))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CompanyId;

    #[test]
    fn test_containment_forward() {
        let customer = ErpCustomer::new("L1").with_name("Windy City Supply");
        let companies = vec![CrmCompany::new("R1").with_name("Windy City Supply Co")];
        let hit = find_name_candidate(&customer, &companies).unwrap();
        assert_eq!(hit.id, CompanyId::new("R1"));
    }

    #[test]
    fn test_containment_reverse() {
        let customer = ErpCustomer::new("L1").with_name("Acme Co Inc");
        let companies = vec![CrmCompany::new("R1").with_name("Acme Co")];
        assert!(find_name_candidate(&customer, &companies).is_some());
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let customer = ErpCustomer::new("L1").with_name("ACME, CO.");
        let companies = vec![CrmCompany::new("R1").with_name("acme co")];
        assert!(find_name_candidate(&customer, &companies).is_some());
    }

    #[test]
    fn test_no_name_no_candidate() {
        let customer = ErpCustomer::new("L1");
        let companies = vec![CrmCompany::new("R1").with_name("Acme Co")];
        assert!(find_name_candidate(&customer, &companies).is_none());
    }

    #[test]
    fn test_nameless_companies_skipped() {
        let customer = ErpCustomer::new("L1").with_name("Acme");
        let companies = vec![CrmCompany::new("R1"), CrmCompany::new("R2").with_name("Acme Co")];
        let hit = find_name_candidate(&customer, &companies).unwrap();
        assert_eq!(hit.id, CompanyId::new("R2"));
    }

    #[test]
    fn test_first_in_order_wins() {
        let customer = ErpCustomer::new("L1").with_name("Acme");
        let companies = vec![
            CrmCompany::new("R1").with_name("Acme East"),
            CrmCompany::new("R2").with_name("Acme West"),
        ];
        let hit = find_name_candidate(&customer, &companies).unwrap();
        assert_eq!(hit.id, CompanyId::new("R1"));
    }
}
