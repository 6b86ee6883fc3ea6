//! Campaign errors.

use storeops::pricing::PricingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CampaignsServiceError {
    #[error("campaign not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for CampaignsServiceError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

/// A single campaign could not be enriched.
#[derive(Debug, Error)]
#[error("failed to transform campaign for product {product_id:?}")]
pub struct TransformError {
    pub product_id: String,

    #[source]
    pub source: PricingError,
}
