//! Pricing
//!
//! Pure derivation of the pricing-engine payload from a raw campaign and whatever
//! product data could be resolved for it. All lookups happen before this module is
//! reached; here every missing input has a fallback and the output is total.
//!
//! The fallbacks (`MRP = selling price × 1.5`, `MOP = selling price`) are
//! provisional business rules, so both live in [`PricingPolicy`] rather than in
//! the derivation itself.
//!
//! Prices enter and leave as `f64`, matching the storage column and the pricing
//! engine's JSON. Every derived amount is computed in [`Decimal`] in between.

use std::fmt;

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive as _, ToPrimitive as _},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::campaigns::RawCampaignRecord;

/// Default multiplier applied to the selling price to get the MOP cost.
pub const DEFAULT_MOP_COST_MULTIPLIER: f64 = 0.979;

/// Default coins attached to every pricing record.
pub const DEFAULT_COINS: u32 = 2000;

/// Default factor applied to the selling price when no MRP can be resolved.
pub const DEFAULT_MRP_FALLBACK_FACTOR: f64 = 1.5;

/// Errors raised while deriving a pricing record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// The campaign has no product identifier.
    #[error("campaign has no product id")]
    MissingProductId,

    /// The selling price is zero, negative, or not a number.
    #[error("invalid selling price {0}")]
    InvalidSellingPrice(f64),

    /// A derived field does not fit the decimal price range.
    #[error("derived {field} is out of range")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Rule deriving the market operating price from the selling price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "factor", rename_all = "snake_case")]
pub enum MopRule {
    /// MOP equals the selling price.
    #[default]
    SellingPrice,

    /// MOP is the selling price scaled by a fixed factor.
    Scaled(f64),
}

impl MopRule {
    /// Apply the rule to a selling price.
    ///
    /// `None` when the scaled price does not fit the decimal range.
    pub fn apply(self, selling_price: f64) -> Option<f64> {
        match self {
            Self::SellingPrice => Some(selling_price),
            Self::Scaled(factor) => scale(selling_price, factor),
        }
    }
}

/// Tunable pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Multiplier for `mop_cost`.
    pub mop_cost_multiplier: f64,

    /// Coins attached to every record.
    pub default_coins: u32,

    /// Factor applied to the selling price when no MRP is known.
    pub mrp_fallback_factor: f64,

    /// How the market operating price is derived.
    pub mop_rule: MopRule,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            mop_cost_multiplier: DEFAULT_MOP_COST_MULTIPLIER,
            default_coins: DEFAULT_COINS,
            mrp_fallback_factor: DEFAULT_MRP_FALLBACK_FACTOR,
            mop_rule: MopRule::SellingPrice,
        }
    }
}

impl PricingPolicy {
    /// MRP used when neither the campaign nor the PIM provides one.
    pub fn fallback_mrp(&self, selling_price: f64) -> Option<f64> {
        scale(selling_price, self.mrp_fallback_factor)
    }

    /// Selling price scaled by the MOP cost multiplier.
    pub fn mop_cost(&self, selling_price: f64) -> Option<f64> {
        scale(selling_price, self.mop_cost_multiplier)
    }
}

/// Multiply a price by a factor in decimal.
///
/// Both operands are read with the shortest decimal that round-trips, so
/// `100.0 × 0.979` is exactly `97.9`.
fn scale(price: f64, factor: f64) -> Option<f64> {
    Decimal::from_f64(price)?
        .checked_mul(Decimal::from_f64(factor)?)?
        .to_f64()
}

/// Product data resolved for a campaign before pricing.
///
/// `None` means "not found"; the derivation substitutes its fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedProduct {
    /// Canonical SKU.
    pub sku_id: Option<String>,

    /// Maximum retail price.
    pub mrp: Option<f64>,
}

/// Payload row for the downstream pricing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPricingRecord {
    /// Canonical SKU; never empty.
    pub sku_id: String,

    /// Product identifier.
    pub product_id: String,

    /// Maximum retail price; always present.
    #[serde(rename = "MRP")]
    pub mrp: f64,

    /// Market operating price.
    #[serde(rename = "MOP")]
    pub market_operating_price: f64,

    /// Campaign selling price.
    pub selling_price: f64,

    /// Selling price scaled by the MOP cost multiplier.
    pub mop_cost: f64,

    /// Cost basis for the selling price; currently the selling price itself.
    pub selling_price_cost: f64,

    /// Loyalty coins.
    pub coins: u32,
}

/// One cell of an export row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportCell {
    /// Text cell.
    Text(String),

    /// Decimal cell.
    Number(f64),

    /// Whole number cell.
    Integer(u32),
}

impl fmt::Display for ExportCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number:.2}"),
            Self::Integer(integer) => write!(f, "{integer}"),
        }
    }
}

impl EnrichedPricingRecord {
    /// Export column headers, in field order.
    pub const COLUMNS: [&'static str; 8] = [
        "sku_id",
        "product_id",
        "MRP",
        "MOP",
        "selling_price",
        "mop_cost",
        "selling_price_cost",
        "coins",
    ];

    /// Flatten the record into an export row matching [`Self::COLUMNS`].
    pub fn to_row(&self) -> [ExportCell; 8] {
        [
            ExportCell::Text(self.sku_id.clone()),
            ExportCell::Text(self.product_id.clone()),
            ExportCell::Number(self.mrp),
            ExportCell::Number(self.market_operating_price),
            ExportCell::Number(self.selling_price),
            ExportCell::Number(self.mop_cost),
            ExportCell::Number(self.selling_price_cost),
            ExportCell::Integer(self.coins),
        ]
    }
}

/// A price is usable when it is strictly positive and fits the decimal range.
///
/// NaN and infinities never are.
pub fn usable_price(price: f64) -> Option<f64> {
    Decimal::from_f64(price)
        .is_some_and(|price| price > Decimal::ZERO)
        .then_some(price)
}

/// Derive the pricing record for a campaign.
///
/// The SKU falls back to the product id and the MRP to
/// [`PricingPolicy::fallback_mrp`], so the result is complete whenever the
/// campaign itself is well formed.
///
/// # Errors
///
/// - [`PricingError::MissingProductId`]: the campaign has a blank product id.
/// - [`PricingError::InvalidSellingPrice`]: the selling price is not usable.
/// - [`PricingError::OutOfRange`]: the policy scaled a price out of range.
pub fn derive_pricing(
    raw: &RawCampaignRecord,
    resolved: ResolvedProduct,
    policy: &PricingPolicy,
) -> Result<EnrichedPricingRecord, PricingError> {
    if raw.product_id.trim().is_empty() {
        return Err(PricingError::MissingProductId);
    }

    let selling_price = usable_price(raw.selling_price)
        .ok_or(PricingError::InvalidSellingPrice(raw.selling_price))?;

    let sku_id = resolved
        .sku_id
        .filter(|sku| !sku.trim().is_empty())
        .unwrap_or_else(|| raw.product_id.clone());

    let mrp = match resolved.mrp.and_then(usable_price) {
        Some(mrp) => mrp,
        None => policy
            .fallback_mrp(selling_price)
            .ok_or(PricingError::OutOfRange { field: "mrp" })?,
    };

    let market_operating_price = policy
        .mop_rule
        .apply(selling_price)
        .ok_or(PricingError::OutOfRange {
            field: "market_operating_price",
        })?;

    let mop_cost = policy
        .mop_cost(selling_price)
        .ok_or(PricingError::OutOfRange { field: "mop_cost" })?;

    Ok(EnrichedPricingRecord {
        sku_id,
        product_id: raw.product_id.clone(),
        mrp,
        market_operating_price,
        selling_price,
        mop_cost,
        selling_price_cost: selling_price,
        coins: policy.default_coins,
    })
}
