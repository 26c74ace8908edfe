//! Logging and OpenTelemetry setup.
//!
//! A `tracing-subscriber` fmt layer is always installed, filtered by `RUST_LOG`
//! (default `info`). With the `telemetry` feature, traces and metrics are also exported
//! over OTLP when any of `OTEL_EXPORTER_OTLP_ENDPOINT`, `OTEL_EXPORTER_OTLP_HEADERS` or
//! `OTEL_EXPORTER_OTLP_PROTOCOL` is set.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[cfg(feature = "telemetry")]
use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
#[cfg(feature = "telemetry")]
use opentelemetry_sdk::{
    Resource,
    metrics::{MeterProviderBuilder, PeriodicReader, SdkMeterProvider},
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};
#[cfg(feature = "telemetry")]
use opentelemetry_semantic_conventions::{
    SCHEMA_URL,
    attribute::{DEPLOYMENT_ENVIRONMENT_NAME, SERVICE_VERSION},
};
#[cfg(feature = "telemetry")]
use std::env;
#[cfg(feature = "telemetry")]
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to build OTLP exporter: {0}")]
    Exporter(String),
    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Telemetry protocol to use for OTLP export
#[cfg(feature = "telemetry")]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TelemetryProtocol {
    HTTP,
    GRPC,
}

#[cfg(feature = "telemetry")]
impl TelemetryProtocol {
    /// Determines telemetry protocol from environment variables if OTEL is configured
    fn from_env() -> Option<Self> {
        let is_enabled = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok()
            || env::var("OTEL_EXPORTER_OTLP_HEADERS").is_ok()
            || env::var("OTEL_EXPORTER_OTLP_PROTOCOL").is_ok();
        if !is_enabled {
            return None;
        }
        let protocol = match env::var("OTEL_EXPORTER_OTLP_PROTOCOL").as_deref() {
            Ok("grpc") => TelemetryProtocol::GRPC,
            _ => TelemetryProtocol::HTTP,
        };
        Some(protocol)
    }
}

/// Installs the global subscriber and keeps exporters alive until dropped.
///
/// ```ignore
/// let telemetry = Telemetry::new()
///     .with_name(env!("CARGO_PKG_NAME"))
///     .with_version(env!("CARGO_PKG_VERSION"))
///     .register()?;
/// let app = app.layer(telemetry.http_tracing());
/// ```
pub struct Telemetry {
    name: &'static str,
    version: &'static str,
    #[cfg(feature = "telemetry")]
    tracer_provider: Option<SdkTracerProvider>,
    #[cfg(feature = "telemetry")]
    meter_provider: Option<SdkMeterProvider>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            #[cfg(feature = "telemetry")]
            tracer_provider: None,
            #[cfg(feature = "telemetry")]
            meter_provider: None,
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    fn env_filter() -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Installs the global `tracing` subscriber.
    #[cfg(not(feature = "telemetry"))]
    pub fn register(self) -> Result<Self, TelemetryError> {
        tracing_subscriber::registry()
            .with(Self::env_filter())
            .with(tracing_subscriber::fmt::layer())
            .try_init()?;
        tracing::debug!(name = self.name, version = self.version, "Logging initialized");
        Ok(self)
    }

    /// Installs the global `tracing` subscriber, with OTLP export when configured.
    #[cfg(feature = "telemetry")]
    pub fn register(mut self) -> Result<Self, TelemetryError> {
        let Some(protocol) = TelemetryProtocol::from_env() else {
            tracing_subscriber::registry()
                .with(Self::env_filter())
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;
            tracing::info!("OpenTelemetry is not enabled");
            return Ok(self);
        };

        let tracer_provider = self.init_tracer_provider(protocol)?;
        let meter_provider = self.init_meter_provider(protocol)?;
        let tracer = tracer_provider.tracer(self.name);

        tracing_subscriber::registry()
            .with(Self::env_filter())
            .with(tracing_subscriber::fmt::layer())
            .with(MetricsLayer::new(meter_provider.clone()))
            .with(OpenTelemetryLayer::new(tracer))
            .try_init()?;

        tracing::info!(
            "OpenTelemetry tracing and metrics exporter is enabled via {:?}",
            protocol
        );
        self.tracer_provider = Some(tracer_provider);
        self.meter_provider = Some(meter_provider);
        Ok(self)
    }

    /// Request spans and response events for every HTTP call.
    pub fn http_tracing(&self) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO))
    }

    #[cfg(feature = "telemetry")]
    fn resource(&self) -> Resource {
        let deployment_env = env::var("DEPLOYMENT_ENV").unwrap_or_else(|_| "develop".to_string());
        Resource::builder()
            .with_service_name(self.name)
            .with_schema_url(
                [
                    KeyValue::new(SERVICE_VERSION, self.version),
                    KeyValue::new(DEPLOYMENT_ENVIRONMENT_NAME, deployment_env),
                ],
                SCHEMA_URL,
            )
            .build()
    }

    #[cfg(feature = "telemetry")]
    fn init_meter_provider(
        &self,
        protocol: TelemetryProtocol,
    ) -> Result<SdkMeterProvider, TelemetryError> {
        let exporter = opentelemetry_otlp::MetricExporter::builder();
        let exporter = match protocol {
            TelemetryProtocol::HTTP => exporter
                .with_http()
                .with_temporality(opentelemetry_sdk::metrics::Temporality::default())
                .build(),
            TelemetryProtocol::GRPC => exporter
                .with_tonic()
                .with_temporality(opentelemetry_sdk::metrics::Temporality::default())
                .build(),
        };
        let exporter = exporter.map_err(|e| TelemetryError::Exporter(e.to_string()))?;

        let reader = PeriodicReader::builder(exporter)
            .with_interval(std::time::Duration::from_secs(30))
            .build();

        let meter_provider = MeterProviderBuilder::default()
            .with_resource(self.resource())
            .with_reader(reader)
            .build();

        global::set_meter_provider(meter_provider.clone());

        Ok(meter_provider)
    }

    #[cfg(feature = "telemetry")]
    fn init_tracer_provider(
        &self,
        protocol: TelemetryProtocol,
    ) -> Result<SdkTracerProvider, TelemetryError> {
        let exporter = opentelemetry_otlp::SpanExporter::builder();
        let exporter = match protocol {
            TelemetryProtocol::HTTP => exporter.with_http().build(),
            TelemetryProtocol::GRPC => exporter.with_tonic().build(),
        };
        let exporter = exporter.map_err(|e| TelemetryError::Exporter(e.to_string()))?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
                1.0,
            ))))
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(self.resource())
            .with_batch_exporter(exporter)
            .build();
        global::set_tracer_provider(tracer_provider.clone());
        Ok(tracer_provider)
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        #[cfg(feature = "telemetry")]
        {
            if let Some(tracer_provider) = self.tracer_provider.as_ref()
                && let Err(err) = tracer_provider.shutdown()
            {
                eprintln!("{err:?}");
            }
            if let Some(meter_provider) = self.meter_provider.as_ref()
                && let Err(err) = meter_provider.shutdown()
            {
                eprintln!("{err:?}");
            }
        }
    }
}
