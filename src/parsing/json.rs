//! JSON file loading for customers, companies, match reports, and overrides.
//!
//! The host application exports these as plain JSON arrays. Match input for
//! the apply step also accepts a full report produced by `crm-link match`,
//! so operators can feed one command's output straight into the next.

use std::path::Path;

use thiserror::Error;

use crate::apply::adapter::ManualOverride;
use crate::core::company::CrmCompany;
use crate::core::customer::ErpCustomer;
use crate::matching::engine::MatchResult;
use crate::matching::report::ReconReport;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Load a JSON array of ERP customers.
///
/// # Errors
///
/// [`ParseError`] on unreadable or malformed input.
pub fn load_customers(path: &Path) -> Result<Vec<ErpCustomer>, ParseError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| ParseError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Load a JSON array of CRM companies.
///
/// # Errors
///
/// [`ParseError`] on unreadable or malformed input.
pub fn load_companies(path: &Path) -> Result<Vec<CrmCompany>, ParseError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| ParseError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Load matches for the apply step: either a full report produced by
/// `crm-link match` or a bare array of match results.
///
/// # Errors
///
/// [`ParseError`] on unreadable input, or input that is neither shape.
pub fn load_matches(path: &Path) -> Result<Vec<MatchResult>, ParseError> {
    let content = read_file(path)?;
    if let Ok(report) = serde_json::from_str::<ReconReport>(&content) {
        return Ok(report.matches);
    }
    serde_json::from_str(&content).map_err(|source| ParseError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Load a JSON array of manual overrides.
///
/// # Errors
///
/// [`ParseError`] on unreadable or malformed input.
pub fn load_overrides(path: &Path) -> Result<Vec<ManualOverride>, ParseError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| ParseError::Json {
        path: path.display().to_string(),
        source,
    })
}
