//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::infrastructure::{data_dir, paths};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Service and instrumentation scope name.
const SERVICE_NAME: &str = "snapshare";

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, else `config.trace_level`, else
/// `info`. Spans go to `snapshare-otlp.json` in the data directory; warnings
/// and errors are also printed to stderr.
///
/// If the data directory cannot be created only the stderr layer is
/// installed. Calling this more than once has no further effect.
///
/// ```rust,no_run
/// use snapshare::observability::init_tracing;
/// use snapshare::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::WARN);

    let dir = data_dir(config);
    let otel_layer = match std::fs::create_dir_all(&dir) {
        Ok(()) => {
            let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
            let provider = tracer::create_tracer_provider(paths::trace_file(&dir), resource, SERVICE_NAME);
            Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        }
        Err(_) => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(stderr_layer)
        .try_init();
}
