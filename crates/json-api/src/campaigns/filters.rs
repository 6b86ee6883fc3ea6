//! Campaign filter query parameters.

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use storeops_app::campaigns::CampaignFilter;

use crate::extensions::*;

/// Query parameters shared by the campaign listing endpoints.
pub(crate) struct FilterParams {
    pub(crate) campaign_types: QueryParam<Vec<String>, false>,
    pub(crate) segment: QueryParam<String, false>,
    pub(crate) brand: QueryParam<String, false>,
    pub(crate) start_date: QueryParam<String, false>,
    pub(crate) end_date: QueryParam<String, false>,
}

impl FilterParams {
    /// Build a store filter, rejecting unparseable dates.
    pub(crate) fn into_filter(self, active_only: bool) -> Result<CampaignFilter, StatusError> {
        Ok(CampaignFilter {
            campaign_types: parse_campaign_types(self.campaign_types),
            start_date: self.start_date.into_date("start_date")?,
            end_date: self.end_date.into_date("end_date")?,
            segment: non_blank(self.segment),
            brand: non_blank(self.brand),
            active_only,
        })
    }
}

pub(crate) fn parse_campaign_types(param: QueryParam<Vec<String>, false>) -> Vec<String> {
    param
        .into_inner()
        .unwrap_or_default()
        .into_iter()
        .map(|campaign_type| campaign_type.trim().to_string())
        .filter(|campaign_type| !campaign_type.is_empty())
        .collect()
}

pub(crate) fn non_blank(param: QueryParam<String, false>) -> Option<String> {
    param
        .into_inner()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
