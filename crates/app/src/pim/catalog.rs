//! Product catalog lookups used during enrichment.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::pim::{
    client::AkeneoClient,
    models::{ProductReference, ProductValue},
};

/// Attribute codes probed for an MRP, in order.
pub const MRP_ATTRIBUTES: [&str; 4] = ["mrp", "MRP", "maximum_retail_price", "list_price"];

/// Attribute code holding the SKU id.
pub const SKU_ATTRIBUTE: &str = "sku";

#[automock]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Resolve the SKU id for `product_id`.
    ///
    /// Falls back to `product_id` when the product has no SKU attribute. Returns
    /// `None` only when the product could not be fetched at all.
    async fn resolve_sku_id(&self, product_id: &str) -> Option<String>;

    /// Resolve the MRP for `product_id` from the first numeric MRP attribute.
    async fn resolve_mrp(&self, product_id: &str) -> Option<f64>;
}

/// SKU id recorded on `product`, else `product_id`.
#[must_use]
pub fn sku_id_of(product: &ProductReference, product_id: &str) -> String {
    product
        .first_value(SKU_ATTRIBUTE)
        .and_then(ProductValue::as_text)
        .unwrap_or_else(|| product_id.to_string())
}

/// First numeric value among [`MRP_ATTRIBUTES`].
#[must_use]
pub fn mrp_of(product: &ProductReference) -> Option<f64> {
    MRP_ATTRIBUTES.iter().find_map(|attribute| {
        product
            .first_value(attribute)
            .and_then(ProductValue::as_number)
    })
}

#[async_trait]
impl ProductCatalog for AkeneoClient {
    async fn resolve_sku_id(&self, product_id: &str) -> Option<String> {
        match self.get_product(product_id).await {
            Ok(product) => Some(sku_id_of(&product, product_id)),
            Err(error) => {
                warn!(product_id, %error, "failed to resolve SKU id");
                None
            }
        }
    }

    async fn resolve_mrp(&self, product_id: &str) -> Option<f64> {
        match self.get_product(product_id).await {
            Ok(product) => mrp_of(&product),
            Err(error) => {
                warn!(product_id, %error, "failed to resolve MRP");
                None
            }
        }
    }
}
