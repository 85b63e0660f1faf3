//! Metric definitions, labeled instances and the recording registry.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A named metric definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Exposition name.
    pub name: String,
    /// Help text emitted in the `# HELP` declaration.
    pub help: String,
}

impl Metric {
    /// Create a new metric definition.
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
        }
    }
}

/// Ordered label set for one metric instance. Absent optional labels are
/// skipped at insertion, so they never render as empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricLabels {
    entries: Vec<(String, String)>,
}

impl MetricLabels {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    /// Append a label only when the value is present.
    pub fn maybe_label(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.label(name, value),
            None => self,
        }
    }

    /// Look up a label value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check if the set has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn stringify(&self) -> String {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{key}={}", escape_label_value(value)))
            .collect();
        pairs.join(", ")
    }
}

fn escape_label_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Gauge-shaped metric; instances carry one observed value plus labels.
#[derive(Debug, Clone)]
pub struct GaugeMetric {
    metric: Metric,
}

impl GaugeMetric {
    /// The underlying definition.
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// The exposition name.
    pub fn name(&self) -> &str {
        &self.metric.name
    }

    /// Create one labeled observation of this gauge.
    pub fn instance(&self, value: f64, labels: MetricLabels) -> MetricInstance {
        MetricInstance {
            metric: self.metric.clone(),
            value,
            labels,
        }
    }
}

/// One recorded observation: metric, value and labels.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInstance {
    /// The metric this instance observes.
    pub metric: Metric,
    /// Observed value.
    pub value: f64,
    /// Instance labels.
    pub labels: MetricLabels,
}

impl MetricInstance {
    /// Render the exposition line for this instance.
    pub fn expose(&self) -> String {
        let value = format_value(self.value);
        if self.labels.is_empty() {
            format!("{} {value}", self.metric.name)
        } else {
            format!("{}{{{}}} {value}", self.metric.name, self.labels.stringify())
        }
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Exposition dialect. Both currently share the gauge line format; the
/// declaration block is what callers key persistence decisions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsDialect {
    Prometheus,
    OpenMetrics,
}

/// Recording sink for metric instances.
///
/// Accumulates observations in memory in record order; exposition declares
/// each metric once, at its first encounter.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    name_prefix: Option<String>,
    instances: Vec<MetricInstance>,
}

impl MetricsRegistry {
    /// Create a registry without a name prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that prefixes every metric name.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: Some(prefix.into()),
            instances: Vec::new(),
        }
    }

    /// Define a gauge, applying the registry prefix to its name.
    pub fn gauge(&self, name: impl Into<String>, help: impl Into<String>) -> GaugeMetric {
        let name = name.into();
        let name = match &self.name_prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name,
        };
        GaugeMetric {
            metric: Metric::new(name, help),
        }
    }

    /// Append one observation.
    pub fn record(&mut self, instance: MetricInstance) {
        self.instances.push(instance);
    }

    /// All recorded observations in record order.
    pub fn instances(&self) -> &[MetricInstance] {
        &self.instances
    }

    /// Render exposition lines: one `# HELP`/`# TYPE` block per metric name
    /// at first encounter, then every instance line in record order.
    pub fn export(&self, _dialect: MetricsDialect) -> Vec<String> {
        let mut declared: HashSet<&str> = HashSet::new();
        let mut lines = Vec::new();
        for instance in &self.instances {
            if declared.insert(instance.metric.name.as_str()) {
                lines.push(format!(
                    "# HELP {} {}",
                    instance.metric.name, instance.metric.help
                ));
                lines.push(format!("# TYPE {} gauge", instance.metric.name));
            }
            lines.push(instance.expose());
        }
        lines
    }

    /// Write the exposition to a file, optionally appending.
    pub fn persist(
        &self,
        path: impl AsRef<Path>,
        dialect: MetricsDialect,
        append: bool,
    ) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(append)
            .write(true)
            .truncate(!append)
            .open(path)?;
        file.write_all(self.export(dialect).join("\n").as_bytes())?;
        file.write_all(b"\n")
    }

    /// Render instances plus the distinct metric definitions as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        let mut seen: HashSet<&str> = HashSet::new();
        let metrics: Vec<&Metric> = self
            .instances
            .iter()
            .filter(|instance| seen.insert(instance.metric.name.as_str()))
            .map(|instance| &instance.metric)
            .collect();
        json!({
            "instances": self.instances,
            "metrics": metrics,
        })
    }
}
