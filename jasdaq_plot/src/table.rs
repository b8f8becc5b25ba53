use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

const METRIC_COLUMNS: &[&str] = &["Metric", "Value"];
const DISTRIBUTION_COLUMNS: &[&str] = &["Latency_ns"];

// Main report, as written by the benchmark runner:
// "Metric","Value"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    // an empty cell is a missing measurement, not an error
    #[serde(rename = "Value")]
    pub value: Option<f64>,
}

// Distribution report, one raw sample per row:
// "Latency_ns"
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatencySample {
    #[serde(rename = "Latency_ns")]
    pub latency_ns: f64,
}

impl LatencySample {
    pub fn latency_ms(&self) -> f64 {
        self.latency_ns / 1_000_000f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    rows: Vec<MetricRow>,
}

impl BenchmarkReport {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        let rows = read_rows(path, METRIC_COLUMNS).wrap_err_with(|| {
            format!("load benchmark report {}", path.display())
        })?;
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<MetricRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport {
    samples: Vec<LatencySample>,
}

impl DistributionReport {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        let samples = read_rows(path, DISTRIBUTION_COLUMNS)
            .wrap_err_with(|| {
                format!("load latency distribution {}", path.display())
            })?;
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[LatencySample] {
        &self.samples
    }

    /// Latencies converted from nanoseconds to milliseconds.
    pub fn latencies_ms(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(LatencySample::latency_ms)
    }
}

// Column names are matched exactly; only field values are trimmed.
fn read_rows<T>(path: &Path, columns: &[&str]) -> Result<Vec<T>, Report>
where
    T: DeserializeOwned,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Fields)
        .from_path(path)?;

    // check columns up front, so that files without rows fail too
    let headers = reader.headers()?;
    if headers.is_empty() {
        eyre::bail!("no columns to parse");
    }
    for column in columns {
        if !headers.iter().any(|header| header == *column) {
            eyre::bail!("missing column {:?}", column);
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record?;
        rows.push(row);
    }
    Ok(rows)
}
