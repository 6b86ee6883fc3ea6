//! Logging setup, Prometheus metrics and request tracing middleware.

use thiserror::Error;

use crate::config::ServerConfig;

mod metrics;
mod request;
mod settings;

pub(crate) use metrics::metrics_handler;
pub(crate) use request::request_logging;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Apply request logging settings and install the global subscriber.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    settings::apply_runtime_config(config);

    storeops_app::logging::init_logging(&config.logging)?;

    Ok(())
}
