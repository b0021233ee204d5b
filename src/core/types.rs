use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Unique identifier for an ERP customer record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// An id that is blank after trimming counts as missing.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a CRM company record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompanyId(pub String);

impl CompanyId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Source systems are loose about id types: Copper company ids are integers,
// Fishbowl account ids arrive as either numbers or strings depending on the
// export. Ids deserialize from both and canonicalize to the string form.

struct FlexibleIdVisitor;

impl Visitor<'_> for FlexibleIdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

fn flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(FlexibleIdVisitor)
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        flexible_id(deserializer).map(Self)
    }
}

impl<'de> Deserialize<'de> for CompanyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        flexible_id(deserializer).map(Self)
    }
}

/// Deserialize an optional identifier field that may arrive as a JSON string
/// or number. Used for `account_number`/`account_order_id` on both sides.
pub(crate) fn opt_flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// The strategy that produced a match, in descending priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Exact lookup on the normalized account number
    AccountNumber,
    /// Exact lookup on the normalized account order id
    AccountOrderId,
    /// Exact lookup on the composite normalized name+address key
    NameAddress,
}

impl MatchStrategy {
    /// The confidence tier a strategy confers on its matches.
    ///
    /// This table is the only place confidence is assigned. Name-containment
    /// candidates on unmatched customers are not matches and always carry
    /// [`Confidence::NAME_ONLY_CANDIDATE`].
    #[must_use]
    pub fn confidence(self) -> Confidence {
        match self {
            Self::AccountNumber => Confidence::High,
            Self::AccountOrderId => Confidence::High,
            Self::NameAddress => Confidence::Medium,
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccountNumber => write!(f, "account_number"),
            Self::AccountOrderId => write!(f, "account_order_id"),
            Self::NameAddress => write!(f, "name_address"),
        }
    }
}

/// Confidence tier for a proposed link
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Tier for name-containment review hints on unmatched customers.
    pub const NAME_ONLY_CANDIDATE: Confidence = Confidence::Low;
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_from_string() {
        let id: CustomerId = serde_json::from_str("\"fb-1001\"").unwrap();
        assert_eq!(id, CustomerId::new("fb-1001"));
    }

    #[test]
    fn test_company_id_from_number() {
        let id: CompanyId = serde_json::from_str("88412").unwrap();
        assert_eq!(id, CompanyId::new("88412"));
    }

    #[test]
    fn test_blank_id_is_missing() {
        assert!(CustomerId::new("   ").is_missing());
        assert!(!CustomerId::new("fb-1").is_missing());
    }

    #[test]
    fn test_confidence_table() {
        assert_eq!(MatchStrategy::AccountNumber.confidence(), Confidence::High);
        assert_eq!(MatchStrategy::AccountOrderId.confidence(), Confidence::High);
        assert_eq!(MatchStrategy::NameAddress.confidence(), Confidence::Medium);
        assert_eq!(Confidence::NAME_ONLY_CANDIDATE, Confidence::Low);
    }

    #[test]
    fn test_strategy_serde_snake_case() {
        let json = serde_json::to_string(&MatchStrategy::AccountOrderId).unwrap();
        assert_eq!(json, "\"account_order_id\"");
        let back: MatchStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MatchStrategy::AccountOrderId);
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
    }
}
