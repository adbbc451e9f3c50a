//! Shared startup plumbing for the ticket binaries.

pub mod bootstrap;
