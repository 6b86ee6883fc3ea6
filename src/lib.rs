//! Store Operations
//!
//! Campaign validation, activity filtering, pricing derivation and summaries for the
//! store operations pricing pipeline. Everything in this crate is synchronous and
//! free of I/O; product lookups and storage live in `storeops-app`.

pub mod activity;
pub mod batch;
pub mod campaigns;
pub mod dates;
pub mod prelude;
pub mod pricing;
pub mod summary;
pub mod validation;
