//! Normalization pipeline and read-only analytics for ticket tables.
//!
//! The producer side reads a raw Jira CSV export, maps it onto the
//! canonical 20-column schema and writes the clean table atomically.
//! The consumer side loads a clean table and derives filtered counts,
//! trends and breakdowns for the presentation layer. Consumers never
//! write the artifact back.

pub mod aggregator;
pub mod filters;
pub mod mapper;
pub mod pipeline;
pub mod reader;
pub mod table;
pub mod writer;

pub use tickets_core as core;
