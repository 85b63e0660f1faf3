//! Extension grouping and gauge emission per directory.

use std::time::{Duration, Instant};

use chrono::Local;
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use walkstat_core::{AssetTree, ScanWarning};
use walkstat_metrics::{MetricLabels, MetricsRegistry};

/// Fixed report column names, in row order.
pub const PATH_EXTENSION_HEADERS: [&str; 9] = [
    "Scope",
    "Date",
    "Time",
    "Files Path",
    "File Extension in Path",
    "Count of Files with Extension in Path",
    "Total Bytes in all Files with Extension in Path",
    "Build ID",
    "Host",
];

/// Optional transaction identity attached to every row and metric instance.
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct AnalyticsOptions {
    /// Transaction (build) identifier.
    pub tx_id: Option<String>,
    /// Host the transaction ran on.
    pub tx_host: Option<String>,
}

impl AnalyticsOptions {
    /// Create a new options builder.
    pub fn builder() -> AnalyticsOptionsBuilder {
        AnalyticsOptionsBuilder::default()
    }
}

/// One (directory, extension) aggregation row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionRow {
    /// Walker identity.
    pub scope: String,
    /// Run date, en-US style (`M/D/YYYY`).
    pub date: String,
    /// Run time, en-US style (`H:MM:SS AM/PM`).
    pub time: String,
    /// Qualified path of the directory.
    pub path: String,
    /// Extension including the leading dot, empty when none.
    pub extension: String,
    /// Number of direct files with this extension.
    pub count: u64,
    /// Sum of their sizes in bytes.
    pub total_bytes: u64,
    /// Transaction identifier, when supplied.
    pub tx_id: Option<String>,
    /// Transaction host, when supplied.
    pub tx_host: Option<String>,
}

/// Result of one analytics run.
#[derive(Debug)]
pub struct AnalyticsReport {
    /// Fixed column names for the rows.
    pub header: [&'static str; 9],
    /// Rows in traversal encounter order.
    pub rows: Vec<ExtensionRow>,
    /// Stat failures; each excluded exactly one file from its group.
    pub warnings: Vec<ScanWarning>,
    /// Wall time of the run.
    pub elapsed: Duration,
}

impl AnalyticsReport {
    /// Check if any stat lookup failed during the run.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

struct ExtensionStat {
    extension: String,
    count: u64,
    total_bytes: u64,
}

/// Extension of a file name: the substring from the last `.` including the
/// dot. Empty when the name has no dot or only a leading one.
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(index) if index > 0 => name[index..].to_string(),
        _ => String::new(),
    }
}

/// Aggregate per-directory extension groups over every walker in the tree.
///
/// One timestamp is captured for the whole run and shared by every row and
/// label. For each directory reachable via `subdirectories()` the direct
/// (terminal child) files are grouped by extension; each group records a
/// count gauge and a bytes gauge into the registry and pushes one report
/// row. Stat failures exclude that one file, land in the report's warning
/// list and never abort the run.
pub fn run_extension_analytics(
    tree: &AssetTree,
    registry: &mut MetricsRegistry,
    options: &AnalyticsOptions,
) -> AnalyticsReport {
    let started = Instant::now();

    let count_gauge = registry.gauge(
        "asset_name_extension_in_path",
        "Count of asset name extensions encountered in path",
    );
    let bytes_gauge = registry.gauge(
        "asset_name_extension_bytes_in_path",
        "Total bytes of asset name extensions encountered in path",
    );

    let now = Local::now();
    let date = now.format("%-m/%-d/%Y").to_string();
    let time = now.format("%-I:%M:%S %p").to_string();

    let mut rows: Vec<ExtensionRow> = Vec::new();
    let mut warnings: Vec<ScanWarning> = Vec::new();

    for walker in tree.walkers() {
        let scope = walker.identity();
        for directory in tree.subdirectories(walker, None) {
            let mut groups: IndexMap<String, ExtensionStat> = IndexMap::new();

            for &child in &directory.children {
                let node = tree.node(child);
                let Some(terminal) = &node.terminal else {
                    continue;
                };
                match node.file_info() {
                    Ok(info) => {
                        let extension = file_extension(&terminal.name);
                        let stat =
                            groups
                                .entry(extension.clone())
                                .or_insert_with(|| ExtensionStat {
                                    extension,
                                    count: 0,
                                    total_bytes: 0,
                                });
                        stat.count += 1;
                        stat.total_bytes += info.size;
                    }
                    Err(err) => {
                        warn!(
                            path = %terminal.path.display(),
                            error = %err,
                            "stat failed, excluding file from extension totals"
                        );
                        warnings.push(ScanWarning::stat_error(&terminal.path, &err));
                    }
                }
            }

            let directory_path = directory.qualified_path.display().to_string();
            for stat in groups.values() {
                let labels = MetricLabels::new()
                    .label("scope", scope)
                    .label("date", &date)
                    .label("time", &time)
                    .label("path", &directory_path)
                    .label("extension", &stat.extension)
                    .maybe_label("txID", options.tx_id.clone())
                    .maybe_label("txHost", options.tx_host.clone());

                registry.record(count_gauge.instance(stat.count as f64, labels.clone()));
                registry.record(bytes_gauge.instance(stat.total_bytes as f64, labels));

                rows.push(ExtensionRow {
                    scope: scope.to_string(),
                    date: date.clone(),
                    time: time.clone(),
                    path: directory_path.clone(),
                    extension: stat.extension.clone(),
                    count: stat.count,
                    total_bytes: stat.total_bytes,
                    tx_id: options.tx_id.clone(),
                    tx_host: options.tx_host.clone(),
                });
            }
        }
    }

    let elapsed = started.elapsed();
    debug!(
        rows = rows.len(),
        warnings = warnings.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "extension analytics complete"
    );

    AnalyticsReport {
        header: PATH_EXTENSION_HEADERS,
        rows,
        warnings,
        elapsed,
    }
}
