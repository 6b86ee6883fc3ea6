//! Campaign Export Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storeops::pricing::{EnrichedPricingRecord, ExportCell};
use storeops_app::campaigns::today;

use crate::{
    campaigns::{errors::into_status_error, filters::FilterParams},
    extensions::*,
    state::State,
};

/// One exported cell.
#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ExportValue {
    Text(String),
    Integer(u32),
    Number(f64),
}

impl From<ExportCell> for ExportValue {
    fn from(cell: ExportCell) -> Self {
        match cell {
            ExportCell::Text(text) => ExportValue::Text(text),
            ExportCell::Integer(integer) => ExportValue::Integer(integer),
            ExportCell::Number(number) => ExportValue::Number(number),
        }
    }
}

/// A pricing sheet ready to be written to a spreadsheet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ExportResponse {
    /// Column headers
    pub columns: Vec<String>,

    /// One row per priced campaign, in column order
    pub rows: Vec<Vec<ExportValue>>,
}

/// Campaign Export Handler
///
/// Prices the matching campaigns and returns them as rows for the downstream
/// pricing sheet.
#[endpoint(tags("campaigns"), summary = "Export Campaign Pricing")]
pub(crate) async fn handler(
    campaign_types: QueryParam<Vec<String>, false>,
    segment: QueryParam<String, false>,
    brand: QueryParam<String, false>,
    start_date: QueryParam<String, false>,
    end_date: QueryParam<String, false>,
    active_only: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<ExportResponse>, StatusError> {
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
        .list_campaigns(filter, today())
        .await
        .map_err(into_status_error)?;

    if campaigns.is_empty() {
        return Err(StatusError::not_found().brief("No campaigns found with the given filters"));
    }

    let batch = state.enricher.process_batch(campaigns).await;

    if batch.campaigns().is_empty() {
        return Err(StatusError::not_found().brief("No valid campaigns to export"));
    }

    Ok(Json(ExportResponse {
        columns: EnrichedPricingRecord::COLUMNS.map(String::from).to_vec(),
        rows: batch
            .campaigns()
            .iter()
            .map(|campaign| campaign.pricing.to_row().into_iter().map(Into::into).collect())
            .collect(),
    }))
}
