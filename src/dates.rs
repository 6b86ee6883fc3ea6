//! Campaign Dates
//!
//! Campaign rows store their validity window as `DD/MM/YYYY` text. The text is
//! parsed once, when the record is built, and kept alongside the parsed value so
//! it can be written back to storage unchanged.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Textual format used by the campaign store, in `strptime` notation.
pub const CAMPAIGN_DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors raised while parsing a campaign date.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CampaignDateError {
    /// The date text was empty or only whitespace.
    #[error("date is empty")]
    Empty,

    /// The date text did not match `DD/MM/YYYY` or named an impossible day.
    #[error("invalid date {0:?}, expected DD/MM/YYYY")]
    Format(String),
}

/// Parse `DD/MM/YYYY` text into a civil date.
///
/// # Errors
///
/// - [`CampaignDateError::Empty`]: the text is blank.
/// - [`CampaignDateError::Format`]: the text is not a valid `DD/MM/YYYY` date.
pub fn parse_campaign_date(text: &str) -> Result<Date, CampaignDateError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(CampaignDateError::Empty);
    }

    Date::strptime(CAMPAIGN_DATE_FORMAT, trimmed)
        .map_err(|_parse_error| CampaignDateError::Format(trimmed.to_string()))
}

/// A campaign date as stored (raw text) together with its parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CampaignDate {
    raw: String,
    parsed: Result<Date, CampaignDateError>,
}

impl CampaignDate {
    /// Build a campaign date from stored text, parsing it immediately.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_campaign_date(&raw);

        Self { raw, parsed }
    }

    /// Build a campaign date from a civil date, rendering it as `DD/MM/YYYY`.
    pub fn from_date(date: Date) -> Self {
        Self {
            raw: date.strftime(CAMPAIGN_DATE_FORMAT).to_string(),
            parsed: Ok(date),
        }
    }

    /// The text exactly as it was stored.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the stored text is blank.
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// The parsed date.
    ///
    /// # Errors
    ///
    /// Returns the error recorded when the stored text was parsed.
    pub fn date(&self) -> Result<Date, CampaignDateError> {
        self.parsed.clone()
    }
}

impl Default for CampaignDate {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl From<String> for CampaignDate {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for CampaignDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<CampaignDate> for String {
    fn from(date: CampaignDate) -> Self {
        date.raw
    }
}

impl fmt::Display for CampaignDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
