use crate::table::{BenchmarkReport, MetricRow};

/// Returns the rows whose metric name contains `needle` (case-sensitive),
/// in report order. No matching rows is not an error.
pub fn metrics_containing<'a>(
    report: &'a BenchmarkReport,
    needle: &str,
) -> Vec<&'a MetricRow> {
    report
        .rows()
        .iter()
        .filter(|row| row.metric.contains(needle))
        .collect()
}
