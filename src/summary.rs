//! Campaign Summaries

use std::collections::BTreeMap;

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive as _, ToPrimitive as _},
};
use serde::Serialize;

use crate::batch::ProcessedCampaign;

/// Descriptive statistics over a set of priced campaigns.
///
/// An empty set serialises to `{"total_campaigns": 0}` only: the statistics are
/// absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignSummary {
    /// Number of campaigns summarised.
    pub total_campaigns: usize,

    /// Statistics, present when at least one campaign was summarised.
    #[serde(flatten)]
    pub statistics: Option<SummaryStatistics>,
}

/// Statistics for a non-empty set of campaigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Distinct campaign types, sorted.
    pub campaign_types: Vec<String>,

    /// Mean selling price.
    pub avg_selling_price: f64,

    /// Lowest selling price.
    pub min_selling_price: f64,

    /// Highest selling price.
    pub max_selling_price: f64,

    /// Mean MRP.
    pub avg_mrp: f64,

    /// Sum of selling prices.
    pub total_potential_revenue: f64,

    /// Number of campaigns per type.
    pub campaign_type_counts: BTreeMap<String, usize>,
}

/// Summarise priced campaigns.
///
/// Totals and means are accumulated in [`Decimal`]. Prices on a
/// [`ProcessedCampaign`] have already passed
/// [`usable_price`](crate::pricing::usable_price), so each converts.
pub fn summarize(campaigns: &[ProcessedCampaign]) -> CampaignSummary {
    let Some(first) = campaigns.first() else {
        return CampaignSummary::default();
    };

    let mut campaign_type_counts = BTreeMap::new();
    let mut total_selling_price = Decimal::ZERO;
    let mut total_mrp = Decimal::ZERO;
    let mut min_selling_price = first.pricing.selling_price;
    let mut max_selling_price = first.pricing.selling_price;

    for campaign in campaigns {
        let selling_price = campaign.pricing.selling_price;

        total_selling_price = total_selling_price.saturating_add(decimal(selling_price));
        total_mrp = total_mrp.saturating_add(decimal(campaign.pricing.mrp));
        min_selling_price = min_selling_price.min(selling_price);
        max_selling_price = max_selling_price.max(selling_price);

        *campaign_type_counts
            .entry(campaign.raw.issue_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    let count = Decimal::from(campaigns.len());

    let campaign_types = campaign_type_counts.keys().cloned().collect();

    CampaignSummary {
        total_campaigns: campaigns.len(),
        statistics: Some(SummaryStatistics {
            campaign_types,
            avg_selling_price: float(total_selling_price / count),
            min_selling_price,
            max_selling_price,
            avg_mrp: float(total_mrp / count),
            total_potential_revenue: float(total_selling_price),
            campaign_type_counts,
        }),
    }
}

fn decimal(price: f64) -> Decimal {
    Decimal::from_f64(price).unwrap_or_default()
}

fn float(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        campaigns::RawCampaignRecord,
        pricing::{PricingPolicy, ResolvedProduct, derive_pricing},
    };

    use super::*;

    fn processed(issue_type: &str, selling_price: f64, mrp: f64) -> TestResult<ProcessedCampaign> {
        let raw = RawCampaignRecord::new(issue_type, "P", selling_price, "01/06/2025", "30/06/2025");

        let pricing = derive_pricing(
            &raw,
            ResolvedProduct {
                sku_id: None,
                mrp: Some(mrp),
            },
            &PricingPolicy::default(),
        )?;

        Ok(ProcessedCampaign::new(raw, pricing))
    }

    #[test]
    fn empty_summary_has_only_total() -> TestResult {
        let summary = summarize(&[]);

        assert_eq!(summary.total_campaigns, 0);
        assert!(summary.statistics.is_none());
        assert_eq!(serde_json::to_string(&summary)?, r#"{"total_campaigns":0}"#);

        Ok(())
    }

    #[test]
    fn statistics_cover_prices_and_types() -> TestResult {
        let campaigns = [
            processed("DOD", 100.0, 200.0)?,
            processed("FLASH_SALE", 50.0, 60.0)?,
            processed("DOD", 150.0, 160.0)?,
        ];

        let summary = summarize(&campaigns);
        let statistics = summary.statistics.ok_or("expected statistics")?;

        assert_eq!(summary.total_campaigns, 3);
        assert_eq!(statistics.campaign_types, ["DOD", "FLASH_SALE"]);
        assert_eq!(statistics.avg_selling_price.to_string(), "100");
        assert_eq!(statistics.min_selling_price.to_string(), "50");
        assert_eq!(statistics.max_selling_price.to_string(), "150");
        assert_eq!(statistics.avg_mrp.to_string(), "140");
        assert_eq!(statistics.total_potential_revenue.to_string(), "300");
        assert_eq!(statistics.campaign_type_counts.get("DOD"), Some(&2));
        assert_eq!(statistics.campaign_type_counts.get("FLASH_SALE"), Some(&1));

        Ok(())
    }

    #[test]
    fn revenue_sums_exactly_in_decimal() -> TestResult {
        let campaigns = [
            processed("DOD", 0.1, 1.0)?,
            processed("DOD", 0.2, 1.0)?,
        ];

        let statistics = summarize(&campaigns)
            .statistics
            .ok_or("expected statistics")?;

        assert_eq!(statistics.total_potential_revenue.to_string(), "0.3");
        assert_eq!(statistics.avg_selling_price.to_string(), "0.15");

        Ok(())
    }

    #[test]
    fn unrecognized_types_are_grouped_by_their_text() -> TestResult {
        let summary = summarize(&[processed("MYSTERY_BOX", 10.0, 20.0)?]);
        let statistics = summary.statistics.ok_or("expected statistics")?;

        assert_eq!(statistics.campaign_types, ["MYSTERY_BOX"]);

        Ok(())
    }

    #[test]
    fn non_empty_summary_serializes_flat() -> TestResult {
        let summary = summarize(&[processed("DOD", 10.0, 20.0)?]);
        let json = serde_json::to_value(&summary)?;

        assert_eq!(json.get("total_campaigns"), Some(&serde_json::json!(1)));
        assert!(json.get("avg_mrp").is_some(), "expected flattened stats in {json}");

        Ok(())
    }
}
