//! Campaign Models

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Criteria for selecting stored campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignFilter {
    /// Campaign types to include; empty includes every type.
    #[serde(default)]
    pub campaign_types: Vec<String>,

    /// Earliest live date.
    #[serde(default)]
    pub start_date: Option<Date>,

    /// Latest end date.
    #[serde(default)]
    pub end_date: Option<Date>,

    #[serde(default)]
    pub segment: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    /// Only include campaigns whose window contains today.
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_active_only() -> bool {
    true
}

impl Default for CampaignFilter {
    fn default() -> Self {
        Self {
            campaign_types: Vec::new(),
            start_date: None,
            end_date: None,
            segment: None,
            brand: None,
            active_only: default_active_only(),
        }
    }
}

impl CampaignFilter {
    /// Filter matching every stored campaign.
    #[must_use]
    pub fn all() -> Self {
        Self {
            active_only: false,
            ..Self::default()
        }
    }
}
