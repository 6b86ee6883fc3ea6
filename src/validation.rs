//! Campaign Validation
//!
//! Diagnostic checks over raw campaigns. Every rule runs independently and all
//! violations are reported; nothing here is fatal.

use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{campaigns::RawCampaignRecord, pricing::usable_price};

/// A structural or temporal defect in a raw campaign.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// `product_id` is blank.
    #[error("Product ID is required")]
    MissingProductId,

    /// `selling_price` is missing, zero, negative, or too large to price.
    #[error("Valid selling price is required")]
    InvalidSellingPrice,

    /// `live_date` is blank.
    #[error("Live date is required")]
    MissingLiveDate,

    /// `end_date` is blank.
    #[error("End date is required")]
    MissingEndDate,

    /// One of the dates does not parse as `DD/MM/YYYY`.
    #[error("Invalid date format. Expected DD/MM/YYYY")]
    InvalidDateFormat,

    /// The end date is on or before the live date.
    #[error("End date must be after live date")]
    EndNotAfterLive,
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validation errors for one campaign; empty means valid.
pub type ValidationErrors = SmallVec<[ValidationError; 4]>;

/// Check a campaign for required fields and a well-ordered validity window.
pub fn validate(raw: &RawCampaignRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if raw.product_id.trim().is_empty() {
        errors.push(ValidationError::MissingProductId);
    }

    if usable_price(raw.selling_price).is_none() {
        errors.push(ValidationError::InvalidSellingPrice);
    }

    if raw.live_date.is_empty() {
        errors.push(ValidationError::MissingLiveDate);
    }

    if raw.end_date.is_empty() {
        errors.push(ValidationError::MissingEndDate);
    }

    match (raw.live_date.date(), raw.end_date.date()) {
        (Ok(live), Ok(end)) => {
            if end <= live {
                errors.push(ValidationError::EndNotAfterLive);
            }
        }
        _ => errors.push(ValidationError::InvalidDateFormat),
    }

    errors
}

/// Tally of validating many campaigns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Campaigns checked.
    pub total_campaigns: usize,

    /// Campaigns without errors.
    pub valid_campaigns: usize,

    /// Campaigns with at least one error.
    pub invalid_campaigns: usize,

    /// Errors per invalid campaign, in input order.
    pub validation_errors: Vec<CampaignValidationErrors>,
}

/// Errors reported for one campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignValidationErrors {
    /// Product the campaign is for.
    pub product_id: String,

    /// Everything wrong with it.
    pub errors: ValidationErrors,
}

/// Validate every campaign and tally the results.
pub fn validate_all<'a>(campaigns: impl IntoIterator<Item = &'a RawCampaignRecord>) -> ValidationReport {
    campaigns
        .into_iter()
        .fold(ValidationReport::default(), |mut report, campaign| {
            report.total_campaigns += 1;

            let errors = validate(campaign);

            if errors.is_empty() {
                report.valid_campaigns += 1;
            } else {
                report.invalid_campaigns += 1;
                report.validation_errors.push(CampaignValidationErrors {
                    product_id: campaign.product_id.clone(),
                    errors,
                });
            }

            report
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(product_id: &str, price: f64, live: &str, end: &str) -> RawCampaignRecord {
        RawCampaignRecord::new("DOD", product_id, price, live, end)
    }

    #[test]
    fn well_formed_campaign_has_no_errors() {
        assert!(validate(&campaign("P1", 10.0, "01/06/2025", "30/06/2025")).is_empty());
    }

    #[test]
    fn end_before_live_is_an_ordering_error() {
        let errors = validate(&campaign("P1", 10.0, "20/01/2025", "19/01/2025"));

        assert_eq!(errors.as_slice(), [ValidationError::EndNotAfterLive]);
        assert_eq!(
            errors.first().map(ToString::to_string).as_deref(),
            Some("End date must be after live date")
        );
    }

    #[test]
    fn same_day_window_is_rejected() {
        let errors = validate(&campaign("P1", 10.0, "20/01/2025", "20/01/2025"));

        assert_eq!(errors.as_slice(), [ValidationError::EndNotAfterLive]);
    }

    #[test]
    fn blank_campaign_reports_every_required_field() {
        let errors = validate(&campaign("", 0.0, "", ""));

        assert!(errors.len() >= 3, "expected at least 3 errors, got {errors:?}");
        assert_eq!(
            errors.as_slice(),
            [
                ValidationError::MissingProductId,
                ValidationError::InvalidSellingPrice,
                ValidationError::MissingLiveDate,
                ValidationError::MissingEndDate,
                ValidationError::InvalidDateFormat,
            ]
        );
    }

    #[test]
    fn unpriceable_selling_prices_are_invalid() {
        for price in [f64::INFINITY, f64::NAN, f64::MAX] {
            let errors = validate(&campaign("P1", price, "01/06/2025", "30/06/2025"));

            assert_eq!(
                errors.as_slice(),
                [ValidationError::InvalidSellingPrice],
                "expected {price} to be rejected"
            );
        }
    }

    #[test]
    fn unparseable_date_skips_ordering_check() {
        let errors = validate(&campaign("P1", 10.0, "2025-01-20", "19/01/2025"));

        assert_eq!(errors.as_slice(), [ValidationError::InvalidDateFormat]);
    }

    #[test]
    fn report_tallies_valid_and_invalid() {
        let campaigns = [
            campaign("P1", 10.0, "01/06/2025", "30/06/2025"),
            campaign("P2", -1.0, "01/06/2025", "30/06/2025"),
            campaign("P3", 10.0, "30/06/2025", "01/06/2025"),
        ];

        let report = validate_all(&campaigns);

        assert_eq!(report.total_campaigns, 3);
        assert_eq!(report.valid_campaigns, 1);
        assert_eq!(report.invalid_campaigns, 2);

        let products: Vec<&str> = report
            .validation_errors
            .iter()
            .map(|entry| entry.product_id.as_str())
            .collect();

        assert_eq!(products, ["P2", "P3"]);
    }
}
