//! JSON-over-HTTP surface for the reconciliation engine.
//!
//! Exactly two operations are exposed, mirroring the library entry points:
//! `POST /api/match` and `POST /api/apply`.

pub mod server;
