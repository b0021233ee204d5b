//! Loaders for the JSON datasets the CLI consumes.

pub mod json;

pub use json::ParseError;
