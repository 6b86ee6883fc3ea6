//! Campaigns

pub mod kinds;
pub mod record;

pub use kinds::{CampaignType, MonetaryType, RequestType};
pub use record::RawCampaignRecord;
