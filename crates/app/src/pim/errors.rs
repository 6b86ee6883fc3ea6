//! PIM client errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain an access token from the PIM.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("PIM rejected the token request with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("PIM token request timed out")]
    Timeout,

    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("malformed token response")]
    Malformed(#[source] serde_json::Error),
}

impl From<reqwest::Error> for AuthenticationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }

        Self::Http(error)
    }
}

/// Failure to fetch a product from the PIM.
#[derive(Debug, Error)]
pub enum ProductLookupError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("product {product_id} lookup failed with status {status}: {body}")]
    Status {
        product_id: String,
        status: StatusCode,
        body: String,
    },

    #[error("product {product_id} lookup timed out")]
    Timeout { product_id: String },

    #[error("http error while fetching product {product_id}")]
    Http {
        product_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed payload for product {product_id}")]
    Malformed {
        product_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot build a PIM URL for product {product_id}")]
    InvalidUrl {
        product_id: String,
        #[source]
        source: url::ParseError,
    },
}

impl ProductLookupError {
    pub(crate) fn transport(product_id: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::Timeout {
                product_id: product_id.to_string(),
            };
        }

        Self::Http {
            product_id: product_id.to_string(),
            source,
        }
    }

    /// Whether the PIM answered that the product does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
