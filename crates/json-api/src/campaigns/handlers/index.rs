//! Campaign Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storeops_app::campaigns::today;

use crate::{
    campaigns::{errors::into_status_error, filters::FilterParams, models::CampaignsResponse},
    extensions::*,
    state::State,
};

/// Campaign Index Handler
///
/// Returns stored campaigns matching the filters, priced with PIM data.
#[endpoint(tags("campaigns"), summary = "List Campaigns")]
pub(crate) async fn handler(
    campaign_types: QueryParam<Vec<String>, false>,
    segment: QueryParam<String, false>,
    brand: QueryParam<String, false>,
    start_date: QueryParam<String, false>,
    end_date: QueryParam<String, false>,
    active_only: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<CampaignsResponse>, StatusError> {
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

    Ok(Json(CampaignsResponse::new(&batch, &filter)))
}
