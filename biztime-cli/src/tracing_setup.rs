//! Logging for the biztime CLI
//!
//! One layered subscriber: an env filter, compact console output, and
//! (with the `telemetry` feature and `--otel`) an OTLP span exporter.
//!
//! Environment variables:
//!   RUST_LOG                          # Overrides the default directives below
//!   OTEL_EXPORTER_OTLP_ENDPOINT       # OTLP endpoint (default: http://localhost:4317)
//!   OTEL_SERVICE_NAME                 # Service name (default: biztime)

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Raise our own targets to debug (used when RUST_LOG is not set)
    pub debug: bool,
    /// Enable OpenTelemetry OTLP export
    pub otel: bool,
}

impl TracingConfig {
    /// Directives used when RUST_LOG is absent. Dependencies stay at warn;
    /// the CLI, the server crate and request traces follow `--debug`.
    fn default_directives(&self) -> String {
        let level = if self.debug { "debug" } else { "info" };
        format!("warn,biztime={level},biztime_server={level},tower_http={level}")
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

/// Install the global subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer);

    #[cfg(feature = "telemetry")]
    let subscriber = subscriber.with(if config.otel { Some(otel::layer()?) } else { None });

    subscriber.try_init().map_err(|err| anyhow!(err))?;

    #[cfg(feature = "telemetry")]
    if config.otel {
        tracing::info!(
            endpoint = %otel::endpoint(),
            service = %otel::service_name(),
            "OpenTelemetry export enabled"
        );
    }

    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        tracing::warn!("--otel ignored: built without the `telemetry` feature");
    }

    Ok(())
}

#[cfg(feature = "telemetry")]
mod otel {
    use anyhow::{anyhow, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    pub fn endpoint() -> String {
        std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".to_string())
    }

    pub fn service_name() -> String {
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "biztime".to_string())
    }

    /// Build the OTLP exporter and register its provider globally.
    pub fn layer<S>() -> Result<OpenTelemetryLayer<S, Tracer>>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint())
            .build()
            .map_err(|e| anyhow!("Failed to create OTLP exporter: {}", e))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
                "service.name",
                service_name(),
            )]))
            .build();

        let tracer = provider.tracer("biztime");
        // Dropping the provider would stop export
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok(tracing_opentelemetry::layer().with_tracer(tracer))
    }
}

/// Shutdown OpenTelemetry (flush pending spans)
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// No-op shutdown when telemetry is disabled
#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}
