//! Campaign Batches

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{campaigns::RawCampaignRecord, pricing::EnrichedPricingRecord};

/// A raw campaign together with its pricing payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedCampaign {
    /// The campaign as read from storage.
    pub raw: RawCampaignRecord,

    /// The derived pricing payload.
    pub pricing: EnrichedPricingRecord,

    /// When the payload was derived.
    pub processed_at: Timestamp,
}

impl ProcessedCampaign {
    /// Pair a raw campaign with its pricing, stamped with the current time.
    pub fn new(raw: RawCampaignRecord, pricing: EnrichedPricingRecord) -> Self {
        Self {
            raw,
            pricing,
            processed_at: Timestamp::now(),
        }
    }
}

/// Outcome of processing a batch of campaigns.
///
/// `processed_count + failed_count == total_count` always holds; the counters are
/// only updated through [`CampaignBatch::push_outcome`]. The batch serialises for
/// reporting but never deserialises, so the counters cannot be forged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignBatch {
    total_count: usize,
    processed_count: usize,
    failed_count: usize,
    campaigns: Vec<ProcessedCampaign>,
}

impl CampaignBatch {
    /// An empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect per-record outcomes, in order, into a batch.
    pub fn from_outcomes<E>(outcomes: impl IntoIterator<Item = Result<ProcessedCampaign, E>>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::new(), |mut batch, outcome| {
                batch.push_outcome(outcome);
                batch
            })
    }

    /// Record one outcome.
    pub fn push_outcome<E>(&mut self, outcome: Result<ProcessedCampaign, E>) {
        self.total_count += 1;

        match outcome {
            Ok(campaign) => {
                self.processed_count += 1;
                self.campaigns.push(campaign);
            }
            Err(_) => self.failed_count += 1,
        }
    }

    /// Number of records offered to the batch.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of records that were priced.
    pub fn processed_count(&self) -> usize {
        self.processed_count
    }

    /// Number of records that failed.
    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    /// Priced campaigns, in input order.
    pub fn campaigns(&self) -> &[ProcessedCampaign] {
        &self.campaigns
    }

    /// Consume the batch, returning the priced campaigns.
    pub fn into_campaigns(self) -> Vec<ProcessedCampaign> {
        self.campaigns
    }
}
