use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{logs::SdkLoggerProvider, trace::SdkTracerProvider, Resource};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

type Error = Box<dyn std::error::Error + Send + Sync>;

/// keeps the OTLP exporters alive. batched spans and logs are flushed on
/// [`TelemetryGuard::shutdown`].
pub struct TelemetryGuard {
    tracer_provider: SdkTracerProvider,
    log_provider: SdkLoggerProvider,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if let Err(e) = self.tracer_provider.shutdown() {
            eprintln!("failed to flush spans: {e}");
        }
        if let Err(e) = self.log_provider.shutdown() {
            eprintln!("failed to flush logs: {e}");
        }
    }
}

fn resource() -> Resource {
    let service_name = env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "quotebook".to_string());
    let service_version =
        env::var("OTEL_SERVICE_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", service_version))
        .build()
}

fn otlp_providers(endpoint: &str) -> Result<TelemetryGuard, Error> {
    let resource = resource();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    let log_provider = SdkLoggerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(log_exporter)
        .build();

    Ok(TelemetryGuard {
        tracer_provider,
        log_provider,
    })
}

/// installs the global subscriber: an env-filtered fmt layer on stderr, plus OTLP span
/// and log export when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
pub fn init_telemetry() -> Result<Option<TelemetryGuard>, Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Ok(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        return Ok(None);
    };

    let guard = otlp_providers(&endpoint)?;
    global::set_tracer_provider(guard.tracer_provider.clone());

    let tracer = guard.tracer_provider.tracer("quotebook");

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&guard.log_provider))
        .try_init()?;

    tracing::info!(endpoint = %endpoint, "OpenTelemetry initialized successfully");
    Ok(Some(guard))
}
