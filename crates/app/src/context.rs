//! App Context

use std::{num::NonZeroUsize, sync::Arc};

use storeops::pricing::PricingPolicy;
use thiserror::Error;

use crate::{
    campaigns::{CampaignEnricher, CampaignsService, PgCampaignsService},
    config::DatabaseConfig,
    database,
    pim::{AkeneoClient, PimConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub campaigns: Arc<dyn CampaignsService>,
    pub enricher: Arc<CampaignEnricher>,
}

impl AppContext {
    /// Build application context from database and PIM settings.
    ///
    /// The PIM is not contacted until the first campaign is enriched.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(
        database: &DatabaseConfig,
        pim: PimConfig,
        policy: PricingPolicy,
        concurrency: NonZeroUsize,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(database)
            .await
            .map_err(AppInitError::Database)?;

        let catalog = Arc::new(AkeneoClient::new(pim));

        Ok(Self {
            campaigns: Arc::new(PgCampaignsService::new(pool)),
            enricher: Arc::new(
                CampaignEnricher::new(catalog, policy).with_concurrency(concurrency),
            ),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("enricher", &self.enricher)
            .finish_non_exhaustive()
    }
}
