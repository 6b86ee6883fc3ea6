//! PIM models.

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pim::config::Secret;

/// Attribute type of asset collection values.
pub const ASSET_COLLECTION_TYPE: &str = "pim_catalog_asset_collection";

/// Asset family used when an asset collection names none.
pub const DEFAULT_ASSET_FAMILY: &str = "pdp_scroll";

/// A product as returned by the PIM, with asset collections expanded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductReference {
    /// Product identifier.
    pub identifier: String,

    /// Product family code.
    #[serde(default)]
    pub family: Option<String>,

    /// Parent product model code.
    #[serde(default)]
    pub parent: Option<String>,

    /// Attribute values keyed by attribute code.
    #[serde(default)]
    pub values: FxHashMap<String, Vec<ProductValue>>,
}

impl ProductReference {
    /// First value recorded for `attribute`.
    #[must_use]
    pub fn first_value(&self, attribute: &str) -> Option<&ProductValue> {
        self.values.get(attribute)?.first()
    }
}

/// A single localised and scoped attribute value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductValue {
    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub scope: Option<String>,

    /// Raw attribute data.
    #[serde(default)]
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_data_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_data: Option<LinkedData>,

    /// Asset documents resolved from the codes in `data`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<Value>,
}

impl ProductValue {
    /// Whether this value is an asset collection that should be expanded.
    #[must_use]
    pub fn is_asset_collection(&self) -> bool {
        self.attribute_type.as_deref() == Some(ASSET_COLLECTION_TYPE)
    }

    /// Asset family the collection's codes belong to.
    #[must_use]
    pub fn asset_family(&self) -> &str {
        self.reference_data_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ASSET_FAMILY)
    }

    /// Asset codes listed in `data`; non-string entries are ignored.
    #[must_use]
    pub fn asset_codes(&self) -> Vec<&str> {
        self.data
            .as_array()
            .map(|codes| codes.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The value as non-empty text, when it is a string or a number.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match &self.data {
            Value::String(text) => {
                let text = text.trim();

                (!text.is_empty()).then(|| text.to_string())
            }
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// The value as a number.
    ///
    /// Accepts numbers, numeric strings, and price collections, where the first
    /// parseable amount wins.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        number_from(&self.data)
    }
}

fn number_from(data: &Value) -> Option<f64> {
    match data {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        Value::Array(prices) => prices
            .iter()
            .find_map(|price| price.get("amount").and_then(number_from)),
        _ => None,
    }
}

/// Option labels attached when products are fetched with attribute options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedData {
    #[serde(default)]
    pub attribute: Option<String>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub labels: FxHashMap<String, String>,
}

/// Access token issued by the PIM.
#[derive(Debug)]
pub struct AccessToken {
    value: Secret,
    token_type: String,
    expires_at: Timestamp,
}

impl AccessToken {
    /// Build a token from a token endpoint response received at `issued_at`.
    #[must_use]
    pub fn from_response(response: TokenResponse, issued_at: Timestamp) -> Self {
        let lifetime = SignedDuration::from_secs(response.expires_in);

        Self {
            value: Secret::from(response.access_token),
            token_type: response.token_type,
            expires_at: issued_at.saturating_add(lifetime).unwrap_or(Timestamp::MAX),
        }
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        let scheme = if self.token_type.is_empty() {
            "Bearer"
        } else {
            &self.token_type
        };

        format!("{scheme} {}", self.value.expose())
    }

    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Body returned by the PIM token endpoint.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: String,

    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"**redacted**")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_payload_deserializes_with_unknown_fields() -> TestResult {
        let product: ProductReference = serde_json::from_value(json!({
            "identifier": "P1",
            "family": "shoes",
            "parent": null,
            "enabled": true,
            "values": {
                "sku": [{ "locale": null, "scope": null, "data": "SKU-1" }],
                "mrp": [{ "locale": null, "scope": "ecommerce", "data": "1299.00" }]
            }
        }))?;

        assert_eq!(product.identifier, "P1");
        assert_eq!(product.family.as_deref(), Some("shoes"));
        assert_eq!(
            product.first_value("sku").and_then(ProductValue::as_text),
            Some("SKU-1".to_string())
        );
        assert_eq!(
            product.first_value("mrp").and_then(ProductValue::as_number),
            Some(1299.0)
        );

        Ok(())
    }

    #[test]
    fn price_collections_yield_their_first_amount() {
        let value = ProductValue {
            data: json!([{ "amount": "not a number", "currency": "EUR" }, { "amount": "499.50", "currency": "INR" }]),
            ..ProductValue::default()
        };

        assert_eq!(value.as_number(), Some(499.5));
    }

    #[test]
    fn blank_text_is_not_a_value() {
        let value = ProductValue {
            data: json!("   "),
            ..ProductValue::default()
        };

        assert_eq!(value.as_text(), None);
    }

    #[test]
    fn asset_collections_default_their_family() {
        let value = ProductValue {
            data: json!(["front", 7, "back"]),
            attribute_type: Some(ASSET_COLLECTION_TYPE.to_string()),
            ..ProductValue::default()
        };

        assert!(value.is_asset_collection());
        assert_eq!(value.asset_family(), DEFAULT_ASSET_FAMILY);
        assert_eq!(value.asset_codes(), ["front", "back"]);
    }

    #[test]
    fn token_expiry_follows_expires_in() -> TestResult {
        let issued_at: Timestamp = "2025-06-15T10:00:00Z".parse()?;

        let token = AccessToken::from_response(
            TokenResponse {
                access_token: "abc".to_string(),
                token_type: "bearer".to_string(),
                expires_in: 60,
            },
            issued_at,
        );

        assert_eq!(token.authorization(), "bearer abc");
        assert!(!token.is_expired_at("2025-06-15T10:00:59Z".parse()?));
        assert!(token.is_expired_at("2025-06-15T10:01:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn token_debug_output_is_redacted() {
        let token = AccessToken::from_response(
            TokenResponse {
                access_token: "very-secret-token".to_string(),
                token_type: String::new(),
                expires_in: 60,
            },
            Timestamp::UNIX_EPOCH,
        );

        assert!(!format!("{token:?}").contains("very-secret-token"));
        assert_eq!(token.authorization(), "Bearer very-secret-token");
    }
}
