//! Campaign Enrichment
//!
//! Resolves SKU ids and MRPs through the product catalog and derives pricing for
//! each campaign. A failing campaign is logged and counted; it never aborts the
//! rest of its batch.

use std::{num::NonZeroUsize, sync::Arc, time::Instant};

use futures::{StreamExt, stream};
use storeops::{
    batch::{CampaignBatch, ProcessedCampaign},
    campaigns::RawCampaignRecord,
    pricing::{EnrichedPricingRecord, PricingPolicy, ResolvedProduct, derive_pricing, usable_price},
};
use tracing::{debug, info, warn};

use crate::{campaigns::errors::TransformError, metrics, pim::ProductCatalog};

pub struct CampaignEnricher {
    catalog: Arc<dyn ProductCatalog>,
    policy: PricingPolicy,
    concurrency: NonZeroUsize,
}

impl std::fmt::Debug for CampaignEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignEnricher")
            .field("policy", &self.policy)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl CampaignEnricher {
    /// Enrich campaigns one at a time.
    #[must_use]
    pub fn new(catalog: Arc<dyn ProductCatalog>, policy: PricingPolicy) -> Self {
        Self {
            catalog,
            policy,
            concurrency: NonZeroUsize::MIN,
        }
    }

    /// Allow up to `concurrency` campaigns to be enriched at once.
    ///
    /// Results keep their input order regardless.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    #[must_use]
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Enrich a single campaign.
    ///
    /// A preferred landing SKU skips the SKU lookup, and a usable MRP on the
    /// record skips the MRP lookup. Catalog misses fall back to the product id
    /// and the policy's fallback MRP.
    ///
    /// # Errors
    ///
    /// Returns an error when the campaign lacks a product id or carries an
    /// unusable selling price.
    pub async fn transform(
        &self,
        raw: &RawCampaignRecord,
    ) -> Result<EnrichedPricingRecord, TransformError> {
        let product_id = raw.product_id.trim();

        // Unpriceable records never reach the PIM.
        let lookup = !product_id.is_empty() && usable_price(raw.selling_price).is_some();

        let sku_id = match raw.preferred_sku() {
            Some(sku) => Some(sku.to_string()),
            None if lookup => self.catalog.resolve_sku_id(product_id).await,
            None => None,
        };

        let mrp = match raw.mrp.and_then(usable_price) {
            Some(mrp) => Some(mrp),
            None if lookup => self.catalog.resolve_mrp(product_id).await,
            None => None,
        };

        derive_pricing(raw, ResolvedProduct { sku_id, mrp }, &self.policy).map_err(|source| {
            TransformError {
                product_id: raw.product_id.clone(),
                source,
            }
        })
    }

    /// Enrich a batch of campaigns, preserving input order.
    pub async fn process_batch(&self, campaigns: Vec<RawCampaignRecord>) -> CampaignBatch {
        let started = Instant::now();
        let total = campaigns.len();

        let outcomes: Vec<Result<ProcessedCampaign, TransformError>> = stream::iter(campaigns)
            .map(|raw| async move {
                let pricing = self.transform(&raw).await?;

                Ok(ProcessedCampaign::new(raw, pricing))
            })
            .buffered(self.concurrency.get())
            .collect()
            .await;

        let batch = CampaignBatch::from_outcomes(outcomes.into_iter().inspect(|outcome| {
            if let Err(error) = outcome {
                warn!(product_id = %error.product_id, error = %error.source, "failed to process campaign");
            }
        }));

        metrics::observe_batch(batch.processed_count(), batch.failed_count());

        if total > 0 {
            info!(
                total = batch.total_count(),
                processed = batch.processed_count(),
                failed = batch.failed_count(),
                elapsed_ms = started.elapsed().as_millis(),
                "processed campaign batch"
            );
        } else {
            debug!("processed empty campaign batch");
        }

        batch
    }
}
