//! Core types for the Jira ticket toolkit.
//!
//! Holds the canonical 20-column row schema, the date normalization
//! rules shared by both producers (CSV normalizer and remote sync), the
//! error type, and the CLI settings structs. No I/O happens here.

pub mod dates;
pub mod error;
pub mod schema;
pub mod settings;
