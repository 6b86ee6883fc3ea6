//! State

use std::{fmt, sync::Arc};

use storeops_app::{
    campaigns::{CampaignEnricher, CampaignsService},
    context::AppContext,
};

/// Campaign storage and enrichment shared by every handler.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) campaigns: Arc<dyn CampaignsService>,
    pub(crate) enricher: Arc<CampaignEnricher>,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::from(app))
    }
}

impl From<AppContext> for State {
    fn from(app: AppContext) -> Self {
        Self {
            campaigns: app.campaigns,
            enricher: app.enricher,
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("enricher", &self.enricher)
            .finish_non_exhaustive()
    }
}
