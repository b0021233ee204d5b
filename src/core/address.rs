use serde::{Deserialize, Serialize};

use crate::utils::normalize::{normalize, normalize_street};

/// A structured postal address attached to a customer or company record.
///
/// Every field is optional; upstream exports routinely ship partial
/// addresses. An address only participates in matching when all four fields
/// survive normalization — a partial address degrades to "no address", it is
/// never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, alias = "zip", skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
}

impl Address {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_postal(mut self, postal: impl Into<String>) -> Self {
        self.postal = Some(postal.into());
        self
    }

    /// True when all four fields normalize to non-empty strings, i.e. the
    /// address can contribute to a composite match key.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        normalize_street(self.street.as_deref()).is_some()
            && normalize(self.city.as_deref()).is_some()
            && normalize(self.state.as_deref()).is_some()
            && normalize(self.postal.as_deref()).is_some()
    }
}
