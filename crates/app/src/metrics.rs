//! Prometheus metrics for campaign batches and PIM lookups.
//!
//! The server exposes these alongside its HTTP metrics through [`gather`].

use std::sync::OnceLock;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, Opts, Registry, proto::MetricFamily,
};
use tracing::error;

#[derive(Debug)]
struct AppMetrics {
    registry: Registry,
    campaigns_processed_total: IntCounter,
    campaigns_failed_total: IntCounter,
    pim_request_duration_seconds: HistogramVec,
}

static APP_METRICS: OnceLock<Option<AppMetrics>> = OnceLock::new();

/// Kind of request made to the PIM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PimOperation {
    Token,
    Product,
    Asset,
}

impl PimOperation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Product => "product",
            Self::Asset => "asset",
        }
    }
}

/// Count the outcome of one enriched batch.
pub(crate) fn observe_batch(processed: usize, failed: usize) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics.campaigns_processed_total.inc_by(count(processed));
    metrics.campaigns_failed_total.inc_by(count(failed));
}

/// Record how long one PIM request took and whether it succeeded.
pub(crate) fn observe_pim_request(operation: PimOperation, success: bool, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let outcome = if success { "success" } else { "error" };

    metrics
        .pim_request_duration_seconds
        .with_label_values(&[operation.as_str(), outcome])
        .observe(duration_seconds);
}

/// Snapshot of every application metric, ready for encoding.
#[must_use]
pub fn gather() -> Vec<MetricFamily> {
    metrics().map_or_else(Vec::new, |metrics| metrics.registry.gather())
}

/// Processed and failed campaign totals so far.
#[cfg(test)]
pub(crate) fn batch_totals() -> (u64, u64) {
    metrics().map_or((0, 0), |metrics| {
        (
            metrics.campaigns_processed_total.get(),
            metrics.campaigns_failed_total.get(),
        )
    })
}

fn count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn metrics() -> Option<&'static AppMetrics> {
    APP_METRICS.get_or_init(build_metrics).as_ref()
}

fn build_metrics() -> Option<AppMetrics> {
    let registry = Registry::new();

    let campaigns_processed_total = match IntCounter::with_opts(Opts::new(
        "storeops_campaigns_processed_total",
        "Campaigns priced successfully across all batches.",
    )) {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create campaigns_processed_total metric: {source}");
            return None;
        }
    };

    let campaigns_failed_total = match IntCounter::with_opts(Opts::new(
        "storeops_campaigns_failed_total",
        "Campaigns that failed to price across all batches.",
    )) {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create campaigns_failed_total metric: {source}");
            return None;
        }
    };

    let pim_request_duration_seconds = match HistogramVec::new(
        HistogramOpts::new(
            "storeops_pim_request_duration_seconds",
            "PIM request duration in seconds partitioned by operation and outcome.",
        )
        .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation", "outcome"],
    ) {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create pim_request_duration metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(campaigns_processed_total.clone())) {
        error!("failed to register campaigns_processed_total metric: {source}");
        return None;
    }

    if let Err(source) = registry.register(Box::new(campaigns_failed_total.clone())) {
        error!("failed to register campaigns_failed_total metric: {source}");
        return None;
    }

    if let Err(source) = registry.register(Box::new(pim_request_duration_seconds.clone())) {
        error!("failed to register pim_request_duration metric: {source}");
        return None;
    }

    Some(AppMetrics {
        registry,
        campaigns_processed_total,
        campaigns_failed_total,
        pim_request_duration_seconds,
    })
}
