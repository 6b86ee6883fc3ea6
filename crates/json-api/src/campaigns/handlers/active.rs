//! Active Campaigns Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storeops::activity::filter_active;
use storeops_app::campaigns::{CampaignFilter, today};

use crate::{
    campaigns::{errors::into_status_error, filters::parse_campaign_types, models::CampaignsResponse},
    extensions::*,
    state::State,
};

/// Active Campaigns Handler
///
/// Returns campaigns whose validity window contains today, priced with PIM
/// data. Stored rows are re-checked against their parsed dates, so rows with
/// unreadable dates are left out.
#[endpoint(tags("campaigns"), summary = "List Active Campaigns")]
pub(crate) async fn handler(
    campaign_types: QueryParam<Vec<String>, false>,
    depot: &mut Depot,
) -> Result<Json<CampaignsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let today = today();

    let filter = CampaignFilter {
        campaign_types: parse_campaign_types(campaign_types),
        ..CampaignFilter::default()
    };

    let campaigns = state
        .campaigns
        .list_campaigns(filter.clone(), today)
        .await
        .map_err(into_status_error)?;

    let batch = state
        .enricher
        .process_batch(filter_active(campaigns, today))
        .await;

    Ok(Json(CampaignsResponse::new(&batch, &filter)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storeops::campaigns::RawCampaignRecord;
    use testresult::TestResult;

    use storeops_app::campaigns::MockCampaignsService;

    use crate::{
        campaigns::handlers::tests::make_campaign,
        test_helpers::{campaigns_service, quiet_catalog},
    };

    use super::*;

    fn make_service(campaigns: MockCampaignsService) -> Service {
        campaigns_service(
            campaigns,
            quiet_catalog(),
            Router::with_path("campaigns/active").get(handler),
        )
    }

    #[tokio::test]
    async fn test_active_drops_campaigns_outside_their_window() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        let running = RawCampaignRecord {
            live_date: "01/01/2000".into(),
            end_date: "31/12/2999".into(),
            ..make_campaign("RUNNING", 100.0)
        };

        let finished = RawCampaignRecord {
            live_date: "01/01/2000".into(),
            end_date: "02/01/2000".into(),
            ..make_campaign("FINISHED", 100.0)
        };

        let unreadable = RawCampaignRecord {
            live_date: "2000-01-01".into(),
            end_date: "31/12/2999".into(),
            ..make_campaign("UNREADABLE", 100.0)
        };

        campaigns
            .expect_list_campaigns()
            .once()
            .withf(|filter, _| filter.active_only && filter.campaign_types == ["DOD"])
            .return_once(move |_, _| Ok(vec![running, finished, unreadable]));

        let response: CampaignsResponse =
            TestClient::get("http://example.com/campaigns/active?campaign_types=DOD")
                .send(&make_service(campaigns))
                .await
                .take_json()
                .await?;

        let product_ids: Vec<&str> = response
            .campaigns
            .iter()
            .map(|campaign| campaign.raw_data.product_id.as_str())
            .collect();

        assert_eq!(product_ids, ["RUNNING"]);
        assert_eq!(response.total_count, 1);

        Ok(())
    }
}
