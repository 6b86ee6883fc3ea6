//! Campaign Facet Handlers
//!
//! Distinct values for populating filter controls.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{campaigns::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignTypesResponse {
    /// Distinct campaign types, sorted
    pub campaign_types: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SegmentsResponse {
    /// Distinct segments, sorted
    pub segments: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandsResponse {
    /// Distinct brands, sorted
    pub brands: Vec<String>,
}

/// Campaign Types Handler
#[endpoint(tags("campaigns"), summary = "List Campaign Types")]
pub(crate) async fn types(depot: &mut Depot) -> Result<Json<CampaignTypesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let campaign_types = state
        .campaigns
        .list_campaign_types()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CampaignTypesResponse { campaign_types }))
}

/// Segments Handler
#[endpoint(tags("campaigns"), summary = "List Segments")]
pub(crate) async fn segments(depot: &mut Depot) -> Result<Json<SegmentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let segment_list = state
        .campaigns
        .list_segments()
        .await
        .map_err(into_status_error)?;

    Ok(Json(SegmentsResponse { segments: segment_list }))
}

/// Brands Handler
#[endpoint(tags("campaigns"), summary = "List Brands")]
pub(crate) async fn brands(depot: &mut Depot) -> Result<Json<BrandsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brand_list = state
        .campaigns
        .list_brands()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandsResponse { brands: brand_list }))
}
