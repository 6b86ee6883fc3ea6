//! Shared command-line and environment configuration.

use std::{num::NonZeroUsize, time::Duration};

use clap::Args;
use storeops::pricing::{
    DEFAULT_COINS, DEFAULT_MOP_COST_MULTIPLIER, DEFAULT_MRP_FALLBACK_FACTOR, MopRule,
    PricingPolicy,
};

use crate::{
    database::DEFAULT_MAX_CONNECTIONS,
    pim::{PimConfig, Secret},
};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Upper bound on pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub database_max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 5)]
    pub database_acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.database_acquire_timeout_seconds)
    }
}

/// Akeneo PIM settings.
#[derive(Debug, Args)]
pub struct PimArgs {
    /// PIM base URL
    #[arg(long, env = "AKENEO_URL")]
    pub akeneo_url: String,

    /// PIM API connection client id
    #[arg(long, env = "AKENEO_CLIENT_ID")]
    pub akeneo_client_id: String,

    /// PIM API connection secret
    #[arg(long, env = "AKENEO_SECRET", hide_env_values = true)]
    pub akeneo_secret: String,

    /// PIM API user name
    #[arg(long, env = "AKENEO_USERNAME")]
    pub akeneo_username: String,

    /// PIM API user password
    #[arg(long, env = "AKENEO_PASSWORD", hide_env_values = true)]
    pub akeneo_password: String,

    /// Timeout for each PIM request, in seconds
    #[arg(long, env = "AKENEO_TIMEOUT_SECONDS", default_value_t = 10)]
    pub akeneo_timeout_seconds: u64,
}

impl PimArgs {
    #[must_use]
    pub fn to_config(&self) -> PimConfig {
        PimConfig {
            base_url: self.akeneo_url.clone(),
            client_id: self.akeneo_client_id.clone(),
            client_secret: Secret::new(self.akeneo_secret.clone()),
            username: self.akeneo_username.clone(),
            password: Secret::new(self.akeneo_password.clone()),
            timeout: Duration::from_secs(self.akeneo_timeout_seconds),
        }
    }
}

/// Pricing policy settings.
#[derive(Debug, Args)]
pub struct PricingArgs {
    /// Multiplier applied to the selling price for the MOP cost
    #[arg(long, env = "DEFAULT_MOP_MULTIPLIER", default_value_t = DEFAULT_MOP_COST_MULTIPLIER)]
    pub mop_multiplier: f64,

    /// Coins attached to every priced campaign
    #[arg(long, env = "DEFAULT_COINS", default_value_t = DEFAULT_COINS)]
    pub coins: u32,

    /// Factor applied to the selling price when no MRP is known
    #[arg(long, env = "MRP_FALLBACK_FACTOR", default_value_t = DEFAULT_MRP_FALLBACK_FACTOR)]
    pub mrp_fallback_factor: f64,

    /// Derive the market operating price by scaling the selling price with this factor
    #[arg(long, env = "MOP_SCALE")]
    pub mop_scale: Option<f64>,

    /// Number of campaigns enriched concurrently
    #[arg(long, env = "BATCH_CONCURRENCY", default_value_t = NonZeroUsize::MIN)]
    pub batch_concurrency: NonZeroUsize,
}

impl PricingArgs {
    #[must_use]
    pub fn to_policy(&self) -> PricingPolicy {
        PricingPolicy {
            mop_cost_multiplier: self.mop_multiplier,
            default_coins: self.coins,
            mrp_fallback_factor: self.mrp_fallback_factor,
            mop_rule: self.mop_scale.map_or(MopRule::SellingPrice, MopRule::Scaled),
        }
    }
}
