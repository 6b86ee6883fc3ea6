//! PIM connection settings.

use std::{fmt, time::Duration};

use reqwest::Url;
use zeroize::Zeroize;

/// Default timeout applied to every PIM request.
pub const DEFAULT_PIM_TIMEOUT: Duration = Duration::from_secs(10);

/// A credential that never shows up in logs and is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Configuration for connecting to the Akeneo PIM.
#[derive(Debug, Clone)]
pub struct PimConfig {
    /// PIM base URL, e.g. `"https://pim.example.com"`.
    pub base_url: String,

    /// API connection client id.
    pub client_id: String,

    /// API connection secret.
    pub client_secret: Secret,

    /// API user name for the password grant.
    pub username: String,

    /// API user password for the password grant.
    pub password: Secret,

    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl PimConfig {
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// URL for a REST resource, each segment percent-encoded on its own.
    pub(crate) fn resource_url(&self, segments: &[&str]) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;

        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let config = PimConfig {
            base_url: "https://pim.example.com".to_string(),
            client_id: "client".to_string(),
            client_secret: Secret::new("client-secret"),
            username: "api".to_string(),
            password: Secret::new("hunter2"),
            timeout: DEFAULT_PIM_TIMEOUT,
        };

        let debug = format!("{config:?}");

        assert!(!debug.contains("hunter2"), "password leaked: {debug}");
        assert!(!debug.contains("client-secret"), "secret leaked: {debug}");
    }

    fn config_for(base_url: &str) -> PimConfig {
        PimConfig {
            base_url: base_url.to_string(),
            client_id: String::new(),
            client_secret: Secret::new(""),
            username: String::new(),
            password: Secret::new(""),
            timeout: DEFAULT_PIM_TIMEOUT,
        }
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = config_for("https://pim.example.com/");

        assert_eq!(
            config.endpoint("/api/oauth/v1/token"),
            "https://pim.example.com/api/oauth/v1/token"
        );
    }

    #[test]
    fn resource_segments_are_percent_encoded() -> Result<(), url::ParseError> {
        let config = config_for("https://pim.example.com/akeneo/");

        let url = config.resource_url(&["api", "rest", "v1", "products", "A/B?#1"])?;

        assert_eq!(
            url.as_str(),
            "https://pim.example.com/akeneo/api/rest/v1/products/A%2FB%3F%231"
        );

        Ok(())
    }

    #[test]
    fn malformed_base_urls_are_reported() {
        assert!(config_for("pim.example.com").resource_url(&["api"]).is_err());
    }
}
