//! Campaign storage, PIM enrichment and shared runtime wiring.

pub mod campaigns;
pub mod config;
pub mod context;
pub mod database;
pub mod logging;
pub mod metrics;
pub mod pim;

#[cfg(test)]
mod test;
