//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use storeops::pricing::PricingPolicy;
use storeops_app::{
    campaigns::{CampaignEnricher, MockCampaignsService},
    context::AppContext,
    pim::MockProductCatalog,
};

use crate::state::State;

/// A catalog that fails the test if pricing ever reaches the PIM.
pub(crate) fn quiet_catalog() -> MockProductCatalog {
    let mut catalog = MockProductCatalog::new();

    catalog.expect_resolve_sku_id().never();
    catalog.expect_resolve_mrp().never();

    catalog
}

pub(crate) fn state_with(
    campaigns: MockCampaignsService,
    catalog: MockProductCatalog,
) -> Arc<State> {
    State::from_app_context(AppContext {
        campaigns: Arc::new(campaigns),
        enricher: Arc::new(CampaignEnricher::new(
            Arc::new(catalog),
            PricingPolicy::default(),
        )),
    })
}

pub(crate) fn campaigns_service(
    campaigns: MockCampaignsService,
    catalog: MockProductCatalog,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(campaigns, catalog)))
            .push(route),
    )
}
