//! Campaign Summary Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storeops::summary::{CampaignSummary, summarize};
use storeops_app::campaigns::today;

use crate::{
    campaigns::{
        errors::into_status_error,
        filters::FilterParams,
        models::{FiltersResponse, ProcessingStats},
    },
    extensions::*,
    state::State,
};

/// Statistics over priced campaigns; only `total_campaigns` is present when
/// nothing was priced.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummaryBody {
    pub total_campaigns: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_types: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_selling_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selling_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selling_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_mrp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_potential_revenue: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_type_counts: Option<BTreeMap<String, usize>>,
}

impl From<CampaignSummary> for SummaryBody {
    fn from(summary: CampaignSummary) -> Self {
        let total_campaigns = summary.total_campaigns;

        match summary.statistics {
            Some(statistics) => SummaryBody {
                total_campaigns,
                campaign_types: Some(statistics.campaign_types),
                avg_selling_price: Some(statistics.avg_selling_price),
                min_selling_price: Some(statistics.min_selling_price),
                max_selling_price: Some(statistics.max_selling_price),
                avg_mrp: Some(statistics.avg_mrp),
                total_potential_revenue: Some(statistics.total_potential_revenue),
                campaign_type_counts: Some(statistics.campaign_type_counts),
            },
            None => SummaryBody {
                total_campaigns,
                campaign_types: None,
                avg_selling_price: None,
                min_selling_price: None,
                max_selling_price: None,
                avg_mrp: None,
                total_potential_revenue: None,
                campaign_type_counts: None,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummaryResponse {
    /// Statistics over the priced campaigns
    pub summary: SummaryBody,

    /// Batch outcome counts
    pub processing_stats: ProcessingStats,

    /// The filters applied
    pub filters_applied: FiltersResponse,
}

/// Campaign Summary Handler
///
/// Prices the matching campaigns and returns statistics over them.
#[endpoint(tags("campaigns"), summary = "Summarise Campaigns")]
pub(crate) async fn handler(
    campaign_types: QueryParam<Vec<String>, false>,
    segment: QueryParam<String, false>,
    brand: QueryParam<String, false>,
    start_date: QueryParam<String, false>,
    end_date: QueryParam<String, false>,
    active_only: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<SummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = FilterParams {
        campaign_types,
        segment,
        brand,
        start_date,
        end_date,
    }
    .into_filter(active_only.into_inner().unwrap_or(true))?;

    let campaigns = state
        .campaigns
        .list_campaigns(filter.clone(), today())
        .await
        .map_err(into_status_error)?;

    let batch = state.enricher.process_batch(campaigns).await;

    Ok(Json(SummaryResponse {
        summary: summarize(batch.campaigns()).into(),
        processing_stats: (&batch).into(),
        filters_applied: (&filter).into(),
    }))
}
