//! Akeneo PIM REST client.

use std::time::Instant;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use jiff::Timestamp;
use reqwest::{Client, Response, Url};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::{
    metrics::{self, PimOperation},
    pim::{
        config::PimConfig,
        errors::{AuthenticationError, ProductLookupError},
        models::{AccessToken, ProductReference, ProductValue, TokenResponse},
    },
};

const TOKEN_PATH: &str = "/api/oauth/v1/token";

/// HTTP client for the Akeneo PIM.
///
/// The access token is acquired lazily on first use and then reused for the
/// lifetime of the client. Concurrent first callers share a single token
/// request; a failed request is not cached, so the next call tries again.
#[derive(Debug)]
pub struct AkeneoClient {
    config: PimConfig,
    http: Client,
    token: OnceCell<AccessToken>,
}

impl AkeneoClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: PimConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            token: OnceCell::new(),
        }
    }

    /// Obtain the access token, requesting one if none is held yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the PIM rejects the credentials, times out, or
    /// answers with a body that is not a token.
    pub async fn authenticate(&self) -> Result<&AccessToken, AuthenticationError> {
        let token = self
            .token
            .get_or_try_init(|| self.request_token())
            .await?;

        if token.is_expired_at(Timestamp::now()) {
            warn!(expires_at = %token.expires_at(), "reusing expired PIM access token");
        }

        Ok(token)
    }

    async fn request_token(&self) -> Result<AccessToken, AuthenticationError> {
        let started = Instant::now();
        let token = self.fetch_token().await;

        metrics::observe_pim_request(
            PimOperation::Token,
            token.is_ok(),
            started.elapsed().as_secs_f64(),
        );

        token
    }

    async fn fetch_token(&self) -> Result<AccessToken, AuthenticationError> {
        let credentials = BASE64.encode(format!(
            "{}:{}",
            self.config.client_id,
            self.config.client_secret.expose()
        ));

        let body = serde_json::json!({
            "grant_type": "password",
            "username": self.config.username,
            "password": self.config.password.expose(),
        });

        let issued_at = Timestamp::now();

        let response = self
            .http
            .post(self.config.endpoint(TOKEN_PATH))
            .header("Authorization", format!("Basic {credentials}"))
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            return Err(AuthenticationError::Rejected { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: TokenResponse =
            serde_json::from_slice(&bytes).map_err(AuthenticationError::Malformed)?;

        debug!(expires_in = parsed.expires_in, "acquired PIM access token");

        Ok(AccessToken::from_response(parsed, issued_at))
    }

    /// Fetch a product with attribute options, expanding asset collections.
    ///
    /// Assets that cannot be fetched are left out of the expanded collection.
    ///
    /// # Errors
    ///
    /// Returns an error when authentication fails, the PIM answers with a
    /// non-success status, the request times out, or the payload is malformed.
    pub async fn get_product(
        &self,
        product_id: &str,
    ) -> Result<ProductReference, ProductLookupError> {
        let mut url =
            self.resource_url(product_id, &["api", "rest", "v1", "products", product_id])?;
        url.set_query(Some("with_attribute_options=true"));

        let response = self
            .authorized_get(PimOperation::Product, url, product_id)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            return Err(ProductLookupError::Status {
                product_id: product_id.to_string(),
                status,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| ProductLookupError::transport(product_id, error))?;

        let mut product: ProductReference =
            serde_json::from_slice(&bytes).map_err(|source| ProductLookupError::Malformed {
                product_id: product_id.to_string(),
                source,
            })?;

        for values in product.values.values_mut() {
            for value in values.iter_mut().filter(|value| value.is_asset_collection()) {
                self.expand_assets(product_id, value).await;
            }
        }

        Ok(product)
    }

    async fn expand_assets(&self, product_id: &str, value: &mut ProductValue) {
        let family = value.asset_family().to_string();
        let mut assets = Vec::new();

        for code in value.asset_codes() {
            match self.get_asset(&family, code).await {
                Ok(asset) => assets.push(asset),
                Err(error) => warn!(
                    product_id,
                    asset_family = %family,
                    asset_code = code,
                    %error,
                    "failed to fetch asset"
                ),
            }
        }

        value.assets = assets;
    }

    async fn get_asset(
        &self,
        family: &str,
        code: &str,
    ) -> Result<serde_json::Value, ProductLookupError> {
        let url = self.resource_url(
            code,
            &["api", "rest", "v1", "asset-families", family, "assets", code],
        )?;

        let response = self.authorized_get(PimOperation::Asset, url, code).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            return Err(ProductLookupError::Status {
                product_id: code.to_string(),
                status,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| ProductLookupError::transport(code, error))?;

        serde_json::from_slice(&bytes).map_err(|source| ProductLookupError::Malformed {
            product_id: code.to_string(),
            source,
        })
    }

    fn resource_url(&self, subject: &str, segments: &[&str]) -> Result<Url, ProductLookupError> {
        self.config
            .resource_url(segments)
            .map_err(|source| ProductLookupError::InvalidUrl {
                product_id: subject.to_string(),
                source,
            })
    }

    async fn authorized_get(
        &self,
        operation: PimOperation,
        url: Url,
        subject: &str,
    ) -> Result<Response, ProductLookupError> {
        let token = self.authenticate().await?;
        let started = Instant::now();

        let response = self
            .http
            .get(url)
            .header("Authorization", token.authorization())
            .timeout(self.config.timeout)
            .send()
            .await;

        metrics::observe_pim_request(
            operation,
            response
                .as_ref()
                .is_ok_and(|response| response.status().is_success()),
            started.elapsed().as_secs_f64(),
        );

        response.map_err(|error| ProductLookupError::transport(subject, error))
    }
}
