//! Campaign Validation Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storeops::validation::{CampaignValidationErrors, ValidationReport, validate_all};
use storeops_app::campaigns::{CampaignFilter, today};

use crate::{
    campaigns::{
        errors::into_status_error,
        filters::{non_blank, parse_campaign_types},
        models::FiltersResponse,
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignErrorsResponse {
    /// The offending campaign's product
    pub product_id: String,

    /// Every rule the campaign breaks
    pub errors: Vec<String>,
}

impl From<CampaignValidationErrors> for CampaignErrorsResponse {
    fn from(campaign: CampaignValidationErrors) -> Self {
        CampaignErrorsResponse {
            product_id: campaign.product_id,
            errors: campaign.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidationResponse {
    pub total_campaigns: usize,
    pub valid_campaigns: usize,
    pub invalid_campaigns: usize,

    /// Errors for each invalid campaign, in storage order
    pub validation_errors: Vec<CampaignErrorsResponse>,

    /// The filters applied
    pub filters_applied: FiltersResponse,
}

impl ValidationResponse {
    fn new(report: ValidationReport, filter: &CampaignFilter) -> Self {
        ValidationResponse {
            total_campaigns: report.total_campaigns,
            valid_campaigns: report.valid_campaigns,
            invalid_campaigns: report.invalid_campaigns,
            validation_errors: report.validation_errors.into_iter().map(Into::into).collect(),
            filters_applied: filter.into(),
        }
    }
}

/// Campaign Validation Handler
///
/// Checks stored campaigns for data problems without pricing them. Campaigns
/// outside their validity window are included.
#[endpoint(tags("campaigns"), summary = "Validate Campaigns")]
pub(crate) async fn handler(
    campaign_types: QueryParam<Vec<String>, false>,
    segment: QueryParam<String, false>,
    brand: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ValidationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = CampaignFilter {
        campaign_types: parse_campaign_types(campaign_types),
        segment: non_blank(segment),
        brand: non_blank(brand),
        ..CampaignFilter::all()
    };

    let campaigns = state
        .campaigns
        .list_campaigns(filter.clone(), today())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ValidationResponse::new(validate_all(&campaigns), &filter)))
}
