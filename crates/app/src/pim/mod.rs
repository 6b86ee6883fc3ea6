//! Akeneo PIM integration.

pub mod catalog;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;

#[cfg(test)]
mod test_server;

pub use catalog::{MockProductCatalog, ProductCatalog};
pub use client::AkeneoClient;
pub use config::{DEFAULT_PIM_TIMEOUT, PimConfig, Secret};
pub use errors::{AuthenticationError, ProductLookupError};
