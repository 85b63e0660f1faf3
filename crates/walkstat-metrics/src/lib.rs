//! Gauge metrics recording, exposition and telemetry for walkstat.
//!
//! [`MetricsRegistry`] is the injected sink analytics records into: it hands
//! out [`GaugeMetric`] definitions, accumulates labeled
//! [`MetricInstance`] observations locally (no concurrent-safe sink needed)
//! and renders them in Prometheus/OpenMetrics exposition format or JSON.
//!
//! [`Telemetry`] is a small performance-instrument collector: prepare an
//! instrument before a pass, measure it after, and the elapsed duration is
//! kept with optional baggage.
//!
//! # Example
//!
//! ```rust
//! use walkstat_metrics::{MetricLabels, MetricsDialect, MetricsRegistry};
//!
//! let mut registry = MetricsRegistry::new();
//! let gauge = registry.gauge("asset_count", "Number of assets seen");
//! registry.record(gauge.instance(3.0, MetricLabels::new().label("path", "src")));
//!
//! let lines = registry.export(MetricsDialect::Prometheus);
//! assert_eq!(lines[0], "# HELP asset_count Number of assets seen");
//! assert_eq!(lines[2], "asset_count{path=\"src\"} 3");
//! ```

mod registry;
mod telemetry;

pub use registry::{
    GaugeMetric, Metric, MetricInstance, MetricLabels, MetricsDialect, MetricsRegistry,
};
pub use telemetry::{Instrument, InstrumentationOptions, PendingInstrument, Telemetry};
