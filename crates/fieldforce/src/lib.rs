//! Credential-compliance engine for field-workforce client assignment.
//!
//! The library owns the eligibility rules — document-type normalization,
//! expiry evaluation, requirement matching, and roster scanning — behind a
//! storage trait so the same engine can run against SQL in production and an
//! in-memory store in tests and demos.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
