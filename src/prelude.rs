//! Storeops prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    activity::{filter_active, filter_active_now, is_active_on},
    batch::{CampaignBatch, ProcessedCampaign},
    campaigns::{CampaignType, MonetaryType, RawCampaignRecord, RequestType},
    dates::{CampaignDate, CampaignDateError, parse_campaign_date},
    pricing::{
        EnrichedPricingRecord, ExportCell, MopRule, PricingError, PricingPolicy, ResolvedProduct,
        derive_pricing,
    },
    summary::{CampaignSummary, SummaryStatistics, summarize},
    validation::{ValidationError, ValidationErrors, ValidationReport, validate, validate_all},
};
