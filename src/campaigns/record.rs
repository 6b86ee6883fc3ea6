//! Raw Campaign Record

use serde::{Deserialize, Serialize};

use crate::{
    campaigns::kinds::{CampaignType, MonetaryType, RequestType},
    dates::CampaignDate,
};

/// One promotional line item as read from the campaign store.
///
/// Only `product_id`, `selling_price`, `mrp`, `preferred_landing_sku_id`, the
/// campaign type and the two dates drive pricing. Everything else is descriptive
/// and carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCampaignRecord {
    /// Campaign kind (`issue_type` column).
    pub issue_type: CampaignType,

    /// First day the campaign is live, `DD/MM/YYYY`.
    pub live_date: CampaignDate,

    /// Last day the campaign is live, `DD/MM/YYYY`.
    pub end_date: CampaignDate,

    /// Customer segment.
    pub segment: String,

    /// Placement slot.
    pub slot: Option<i32>,

    /// Kind of change requested.
    pub request_type: RequestType,

    /// Organic or paid placement.
    pub monetary_type: Option<MonetaryType>,

    /// Cost per click.
    pub cpc: Option<f64>,

    /// Product identifier in the PIM.
    pub product_id: String,

    /// Product name as known to the PIM when the row was created.
    pub akeneo_product_name: Option<String>,

    /// Brand name as known to the PIM when the row was created.
    pub akeneo_brand_name: Option<String>,

    /// Campaign selling price.
    pub selling_price: f64,

    /// Inventory the campaign expects to move.
    pub projected_inventory: Option<i64>,

    /// Brand.
    pub brand: Option<String>,

    /// SKU the campaign should land on, overriding the PIM lookup.
    pub preferred_landing_sku_id: Option<String>,

    /// Campaign property.
    pub property: Option<String>,

    /// Funnel stage.
    pub funnel: Option<String>,

    /// Merchandising vertical.
    pub mv: Option<String>,

    /// Date of the top bet, free text.
    pub top_bet_date: Option<String>,

    /// Campaign name.
    pub campaign_name: Option<String>,

    /// Top bet marker.
    pub top_bet: Option<String>,

    /// Article type.
    pub article_type: Option<String>,

    /// PIM family at the time the row was created.
    pub akeneo_family: Option<String>,

    /// Maximum retail price, when the campaign team supplied one.
    pub mrp: Option<f64>,

    /// Secondary segment.
    pub segment_in: Option<String>,

    /// Remarks.
    pub remarks: Option<String>,

    /// Pricing remarks.
    pub price_remarks: Option<String>,

    /// Email of the user who raised the campaign.
    pub user_email: Option<String>,

    /// Expected impressions.
    pub impressions: Option<i64>,

    /// Total advertising cost of sales.
    pub tacos: Option<f64>,

    /// Row index in the source sheet.
    pub index: Option<i32>,

    /// Inventory available at the time of the request.
    pub available_inventory: Option<i64>,
}

impl RawCampaignRecord {
    /// Build a record from the fields pricing depends on; descriptive fields stay empty.
    pub fn new(
        issue_type: impl Into<CampaignType>,
        product_id: impl Into<String>,
        selling_price: f64,
        live_date: impl Into<CampaignDate>,
        end_date: impl Into<CampaignDate>,
    ) -> Self {
        Self {
            issue_type: issue_type.into(),
            product_id: product_id.into(),
            selling_price,
            live_date: live_date.into(),
            end_date: end_date.into(),
            ..Self::default()
        }
    }

    /// The preferred landing SKU, ignoring blank values.
    pub fn preferred_sku(&self) -> Option<&str> {
        self.preferred_landing_sku_id
            .as_deref()
            .map(str::trim)
            .filter(|sku| !sku.is_empty())
    }
}
