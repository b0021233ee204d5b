//! Identifier and address normalization.
//!
//! Every join key the engine uses goes through these helpers, so index
//! construction and strategy lookups always agree on the canonical form.
//! All functions are pure and idempotent.

use crate::core::address::Address;

/// Street-type words dropped from street lines, so "1 Main St" and
/// "1 Main Street" normalize to the same key.
const STREET_SUFFIXES: &[&str] = &[
    "street",
    "st",
    "avenue",
    "ave",
    "road",
    "rd",
    "drive",
    "dr",
    "lane",
    "ln",
    "boulevard",
    "blvd",
];

/// Canonicalize an identifier or name for matching.
///
/// Trims, lowercases, and strips every non-alphanumeric character, so
/// formatting differences like dashes or spaces in account numbers don't
/// break exact lookups. Returns `None` for absent input or input that is
/// empty after cleaning.
///
/// # Examples
///
/// ```
/// use crm_link::utils::normalize::normalize;
///
/// assert_eq!(normalize(Some(" ABC-123 ")), Some("abc123".to_string()));
/// assert_eq!(normalize(Some("   ")), None);
/// assert_eq!(normalize(None), None);
/// ```
#[must_use]
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Canonicalize a street line.
///
/// Like [`normalize`], but first drops street-type words (St, Ave, Rd, ...)
/// at word granularity. A street line that consists only of such words
/// normalizes to `None`.
#[must_use]
pub fn normalize_street(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let lowered = raw.to_lowercase();
    let kept: String = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && !STREET_SUFFIXES.contains(word))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}

/// Compose the composite name+address join key.
///
/// Requires the name and all four address fields to normalize to non-empty
/// strings; a record with a partial address is excluded from name+address
/// matching entirely. The `|` separator keeps adjacent fields from bleeding
/// into each other (every part is alphanumeric-only).
#[must_use]
pub fn name_address_key(name: Option<&str>, address: Option<&Address>) -> Option<String> {
    let name = normalize(name)?;
    let address = address?;
    let street = normalize_street(address.street.as_deref())?;
    let city = normalize(address.city.as_deref())?;
    let state = normalize(address.state.as_deref())?;
    let postal = normalize(address.postal.as_deref())?;
    Some(format!("{name}|{street}|{city}|{state}|{postal}"))
}
