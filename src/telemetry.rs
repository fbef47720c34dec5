use anyhow::Result;
use once_cell::sync::Lazy;

use opentelemetry::{
    global,
    metrics::{Histogram, Meter, MeterProvider},
    trace::TracerProvider as _,
    KeyValue,
};
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{metrics::SdkMeterProvider, resource::Resource, trace::SdkTracerProvider};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, Registry};

use crate::obs::tracingx::filter_from_env;

static COMMIT_SHA: Lazy<String> =
    Lazy::new(|| std::env::var("CE_COMMIT_SHA").unwrap_or_else(|_| "unknown".into()));

pub struct Telemetry {
    pub tracer_provider: SdkTracerProvider,
    pub meter_provider: SdkMeterProvider,
    pub meter: Meter,
    pub op_latency_ms: Histogram<f64>,
    pub health_ratio: Histogram<f64>,
}

impl Telemetry {
    pub fn shutdown(&self) {
        let _ = self.meter_provider.force_flush();
        let _ = self.meter_provider.shutdown();
        let _ = self.tracer_provider.shutdown();
    }
}

/// Instala subscriber (fmt + OTel) e exportadores OTLP/HTTP de traces e métricas.
pub fn init(service_name: &str) -> Result<Telemetry> {
    let base = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4318".to_string());
    let traces_ep = std::env::var("OTEL_EXPORTER_OTLP_TRACES_ENDPOINT")
        .unwrap_or_else(|_| format!("{}/v1/traces", base));
    let metrics_ep = std::env::var("OTEL_EXPORTER_OTLP_METRICS_ENDPOINT")
        .unwrap_or_else(|_| format!("{}/v1/metrics", base));

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("git.commit.sha", COMMIT_SHA.clone()),
        ])
        .build();

    // ---- Traces (OTLP/HTTP) ----
    let span_exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(traces_ep)
        .build()?;
    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();
    let tracer = tracer_provider.tracer(service_name.to_string());

    // ---- Métricas (OTLP/HTTP) ----
    let metric_exporter = MetricExporter::builder()
        .with_http()
        .with_endpoint(metrics_ep)
        .build()?;
    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_periodic_exporter(metric_exporter)
        .build();

    global::set_tracer_provider(tracer_provider.clone());
    global::set_meter_provider(meter_provider.clone());

    // tracing -> OTel
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let subscriber = Registry::default()
        .with(filter_from_env())
        .with(fmt_layer)
        .with(otel_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    let meter = meter_provider.meter("corn_lending");
    let op_latency_ms = meter
        .f64_histogram("op_latency_ms")
        .with_unit("ms")
        .with_description("Latency of lending operations in ms")
        .build();
    let health_ratio = meter
        .f64_histogram("position_health_ratio")
        .with_unit("1")
        .with_description("Health ratio of positions after self-initiated operations")
        .build();

    Ok(Telemetry { tracer_provider, meter_provider, meter, op_latency_ms, health_ratio })
}

/// Só a camada fmt, sem exportadores (testes, demos offline).
pub fn init_fmt_only() -> Result<()> {
    let subscriber = Registry::default()
        .with(filter_from_env())
        .with(tracing_subscriber::fmt::layer().with_target(false));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Cria um `Span` INFO com nome **estático** (exigência do tracing) e
/// coloca o nome dinâmico em `span_name`. Inclui `git_commit_sha`.
pub fn make_info_span(name: &str, op_id: u64, component: &str) -> tracing::Span {
    tracing::span!(
        target: "corn_lending",
        Level::INFO,
        "op",
        git_commit_sha = %COMMIT_SHA.as_str(),
        span_name = %name,
        op_id = op_id,
        component = component
    )
}
