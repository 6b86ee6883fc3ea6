//! Campaign response models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storeops::{
    batch::{CampaignBatch, ProcessedCampaign},
    campaigns::RawCampaignRecord,
    pricing::EnrichedPricingRecord,
};
use storeops_app::campaigns::CampaignFilter;

/// A campaign as stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignRecordResponse {
    /// Campaign type, e.g. `DOD`
    pub issue_type: String,

    /// First day of the campaign (`DD/MM/YYYY`)
    pub live_date: String,

    /// Last day of the campaign (`DD/MM/YYYY`)
    pub end_date: String,

    pub segment: String,
    pub slot: Option<i32>,
    pub request_type: String,
    pub monetary_type: Option<String>,
    pub cpc: Option<f64>,
    pub product_id: String,
    pub akeneo_product_name: Option<String>,
    pub akeneo_brand_name: Option<String>,
    pub selling_price: f64,
    pub projected_inventory: Option<i64>,
    pub brand: Option<String>,
    pub preferred_landing_sku_id: Option<String>,
    pub property: Option<String>,
    pub funnel: Option<String>,
    pub mv: Option<String>,
    pub top_bet_date: Option<String>,
    pub campaign_name: Option<String>,
    pub top_bet: Option<String>,
    pub article_type: Option<String>,
    pub akeneo_family: Option<String>,

    /// Maximum retail price recorded with the campaign
    #[serde(rename = "MRP")]
    pub mrp: Option<f64>,

    pub segment_in: Option<String>,
    pub remarks: Option<String>,
    pub price_remarks: Option<String>,
    pub user_email: Option<String>,
    pub impressions: Option<i64>,
    pub tacos: Option<f64>,
    pub index: Option<i32>,
    pub available_inventory: Option<i64>,
}

impl From<&RawCampaignRecord> for CampaignRecordResponse {
    fn from(raw: &RawCampaignRecord) -> Self {
        CampaignRecordResponse {
            issue_type: raw.issue_type.to_string(),
            live_date: raw.live_date.raw().to_string(),
            end_date: raw.end_date.raw().to_string(),
            segment: raw.segment.clone(),
            slot: raw.slot,
            request_type: raw.request_type.to_string(),
            monetary_type: raw.monetary_type.as_ref().map(ToString::to_string),
            cpc: raw.cpc,
            product_id: raw.product_id.clone(),
            akeneo_product_name: raw.akeneo_product_name.clone(),
            akeneo_brand_name: raw.akeneo_brand_name.clone(),
            selling_price: raw.selling_price,
            projected_inventory: raw.projected_inventory,
            brand: raw.brand.clone(),
            preferred_landing_sku_id: raw.preferred_landing_sku_id.clone(),
            property: raw.property.clone(),
            funnel: raw.funnel.clone(),
            mv: raw.mv.clone(),
            top_bet_date: raw.top_bet_date.clone(),
            campaign_name: raw.campaign_name.clone(),
            top_bet: raw.top_bet.clone(),
            article_type: raw.article_type.clone(),
            akeneo_family: raw.akeneo_family.clone(),
            mrp: raw.mrp,
            segment_in: raw.segment_in.clone(),
            remarks: raw.remarks.clone(),
            price_remarks: raw.price_remarks.clone(),
            user_email: raw.user_email.clone(),
            impressions: raw.impressions,
            tacos: raw.tacos,
            index: raw.index,
            available_inventory: raw.available_inventory,
        }
    }
}

/// The pricing payload sent downstream.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PricingResponse {
    /// Canonical SKU id
    pub sku_id: String,

    /// Product identifier
    pub product_id: String,

    /// Maximum retail price
    #[serde(rename = "MRP")]
    pub mrp: f64,

    /// Market operating price
    #[serde(rename = "MOP")]
    pub market_operating_price: f64,

    /// Campaign selling price
    pub selling_price: f64,

    /// Selling price scaled by the MOP cost multiplier
    pub mop_cost: f64,

    /// Cost basis for the selling price
    pub selling_price_cost: f64,

    /// Loyalty coins
    pub coins: u32,
}

impl From<&EnrichedPricingRecord> for PricingResponse {
    fn from(pricing: &EnrichedPricingRecord) -> Self {
        PricingResponse {
            sku_id: pricing.sku_id.clone(),
            product_id: pricing.product_id.clone(),
            mrp: pricing.mrp,
            market_operating_price: pricing.market_operating_price,
            selling_price: pricing.selling_price,
            mop_cost: pricing.mop_cost,
            selling_price_cost: pricing.selling_price_cost,
            coins: pricing.coins,
        }
    }
}

/// A stored campaign together with its derived pricing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignResponse {
    /// The campaign as stored
    pub raw_data: CampaignRecordResponse,

    /// The derived pricing payload
    pub pricing: PricingResponse,

    /// When the pricing was derived
    pub processed_at: String,
}

impl From<&ProcessedCampaign> for CampaignResponse {
    fn from(campaign: &ProcessedCampaign) -> Self {
        CampaignResponse {
            raw_data: (&campaign.raw).into(),
            pricing: (&campaign.pricing).into(),
            processed_at: campaign.processed_at.to_string(),
        }
    }
}

/// The filters a response was computed with.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FiltersResponse {
    pub campaign_types: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub segment: Option<String>,
    pub brand: Option<String>,
    pub active_only: bool,
}

impl From<&CampaignFilter> for FiltersResponse {
    fn from(filter: &CampaignFilter) -> Self {
        FiltersResponse {
            campaign_types: filter.campaign_types.clone(),
            start_date: filter.start_date.as_ref().map(ToString::to_string),
            end_date: filter.end_date.as_ref().map(ToString::to_string),
            segment: filter.segment.clone(),
            brand: filter.brand.clone(),
            active_only: filter.active_only,
        }
    }
}

/// Outcome counts for a processed batch.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProcessingStats {
    /// Campaigns read from storage
    pub total_fetched: usize,

    /// Campaigns priced successfully
    pub successfully_processed: usize,

    /// Campaigns that could not be priced
    pub failed: usize,
}

impl From<&CampaignBatch> for ProcessingStats {
    fn from(batch: &CampaignBatch) -> Self {
        ProcessingStats {
            total_fetched: batch.total_count(),
            successfully_processed: batch.processed_count(),
            failed: batch.failed_count(),
        }
    }
}

/// Priced campaigns with batch counts.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignsResponse {
    /// Campaigns read from storage
    pub total_count: usize,

    /// Campaigns priced successfully
    pub processed_count: usize,

    /// Campaigns that could not be priced
    pub failed_count: usize,

    /// The priced campaigns, in storage order
    pub campaigns: Vec<CampaignResponse>,

    /// The filters applied
    pub filters_applied: FiltersResponse,
}

impl CampaignsResponse {
    pub(crate) fn new(batch: &CampaignBatch, filter: &CampaignFilter) -> Self {
        CampaignsResponse {
            total_count: batch.total_count(),
            processed_count: batch.processed_count(),
            failed_count: batch.failed_count(),
            campaigns: batch.campaigns().iter().map(Into::into).collect(),
            filters_applied: filter.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use storeops::pricing::{PricingPolicy, ResolvedProduct, derive_pricing};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn pricing_uses_upstream_field_names() -> TestResult {
        let raw = RawCampaignRecord::new("DOD", "P1", 100.0, "01/06/2025", "30/06/2025");
        let pricing = derive_pricing(&raw, ResolvedProduct::default(), &PricingPolicy::default())?;

        let json = serde_json::to_value(PricingResponse::from(&pricing))?;

        assert_eq!(json["MRP"], 150.0);
        assert_eq!(json["MOP"], 100.0);
        assert_eq!(json["coins"], 2000);

        Ok(())
    }

    #[test]
    fn filters_render_dates_as_iso() {
        let filter = CampaignFilter {
            start_date: Some(date(2025, 6, 1)),
            ..CampaignFilter::default()
        };

        let response = FiltersResponse::from(&filter);

        assert_eq!(response.start_date.as_deref(), Some("2025-06-01"));
        assert_eq!(response.end_date, None);
        assert!(response.active_only, "filters default to active only");
    }
}
