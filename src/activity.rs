//! Active Campaigns
//!
//! Best-effort filtering by validity window. Campaigns whose dates cannot be parsed
//! are dropped with a warning; reporting them is the validator's job.

use jiff::{Zoned, civil::Date};
use tracing::warn;

use crate::campaigns::RawCampaignRecord;

/// Whether a campaign's window contains `today`, inclusive at both ends.
///
/// Returns `None` when either date fails to parse.
pub fn is_active_on(campaign: &RawCampaignRecord, today: Date) -> Option<bool> {
    let live = campaign.live_date.date().ok()?;
    let end = campaign.end_date.date().ok()?;

    Some(live <= today && today <= end)
}

/// Keep the campaigns active on `today`, preserving order.
pub fn filter_active<I>(campaigns: I, today: Date) -> Vec<RawCampaignRecord>
where
    I: IntoIterator<Item = RawCampaignRecord>,
{
    campaigns
        .into_iter()
        .filter(|campaign| match is_active_on(campaign, today) {
            Some(active) => active,
            None => {
                warn!(
                    product_id = %campaign.product_id,
                    live_date = %campaign.live_date,
                    end_date = %campaign.end_date,
                    "skipping campaign with invalid date format"
                );

                false
            }
        })
        .collect()
}

/// Keep the campaigns active today in the system time zone.
pub fn filter_active_now<I>(campaigns: I) -> Vec<RawCampaignRecord>
where
    I: IntoIterator<Item = RawCampaignRecord>,
{
    filter_active(campaigns, Zoned::now().date())
}
