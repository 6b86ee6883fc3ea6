//! Campaigns

pub mod enrichment;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use enrichment::CampaignEnricher;
pub use errors::{CampaignsServiceError, TransformError};
pub use models::CampaignFilter;
pub use service::*;
