//! Product Campaign Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    campaigns::{
        errors::into_status_error,
        models::{CampaignResponse, ProcessingStats},
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCampaignResponse {
    /// The requested product
    pub product_id: String,

    /// The product's most recent campaign, priced
    pub campaign: CampaignResponse,

    /// Batch outcome counts
    pub processing_stats: ProcessingStats,
}

/// Product Campaign Handler
///
/// Returns the most recent campaign for a product, priced with PIM data.
#[endpoint(tags("campaigns"), summary = "Get Campaign For Product")]
pub(crate) async fn handler(
    product_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductCampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product_id = product_id.into_inner();

    let campaign = state
        .campaigns
        .get_campaign_by_product_id(&product_id)
        .await
        .map_err(into_status_error)?;

    let batch = state.enricher.process_batch(vec![campaign]).await;

    let Some(processed) = batch.campaigns().first() else {
        error!(product_id = %product_id, "failed to price campaign for product");

        return Err(StatusError::internal_server_error()
            .brief(format!("Error processing campaign for product {product_id}")));
    };

    Ok(Json(ProductCampaignResponse {
        campaign: processed.into(),
        processing_stats: (&batch).into(),
        product_id,
    }))
}
