pub mod chart;
pub mod config;
pub mod filter;
mod fmt;
pub mod locate;
pub mod table;

// Re-exports.
pub use config::Config;
pub use fmt::{MetricKind, PlotFmt};

use chart::{BarChart, LatencyHistogram, Renderer};
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use locate::{Locator, Pattern};
use std::path::PathBuf;
use table::{BenchmarkReport, DistributionReport};
use tracing::info;

/// What a run read and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    pub report: PathBuf,
    pub distribution: Option<PathBuf>,
    /// Charts in the order they were written.
    pub charts: Vec<PathBuf>,
}

/// Renders the latency and throughput charts from the most recent benchmark
/// report and, if there's one, the latency histogram from the most recent
/// distribution report.
///
/// Fails before drawing anything if there's no benchmark report. A failure
/// while drawing leaves the charts already written in place.
pub fn visualize(config: &Config) -> Result<Outputs, Report> {
    let locator = Locator::new(config.reports_dir());

    // find the most recent report
    let pattern = Pattern::new(config.report_pattern());
    let report_path = locator.latest(&pattern)?.ok_or_else(|| {
        eyre::eyre!(
            "no files matching {:?} in {}",
            config.report_pattern(),
            config.reports_dir().display()
        )
    })?;
    info!("[visualize] latest report: {}", report_path.display());
    let report = BenchmarkReport::load(&report_path)?;

    let typeface = chart::font::typeface(config.font_dirs());
    let renderer = Renderer::new(config.image_size(), typeface);
    let mut charts = Vec::with_capacity(3);

    for kind in MetricKind::all() {
        let rows = filter::metrics_containing(&report, kind.needle());
        let bar_chart = BarChart::new(kind, rows);
        let path = match kind {
            MetricKind::Latency => config.latency_chart(),
            MetricKind::Throughput => config.throughput_chart(),
        };
        renderer
            .bar_chart(&bar_chart, &path)
            .wrap_err_with(|| format!("render {:?} chart", kind))?;
        info!(
            "[visualize] {} with {} bar(s)",
            path.display(),
            bar_chart.bars().len()
        );
        charts.push(path);
    }

    // the distribution report is optional
    let pattern = Pattern::new(config.distribution_pattern());
    let distribution_path = locator.latest(&pattern)?;
    match &distribution_path {
        Some(distribution_path) => {
            info!(
                "[visualize] latest distribution: {}",
                distribution_path.display()
            );
            let distribution = DistributionReport::load(distribution_path)?;
            let histogram = LatencyHistogram::new(
                distribution.latencies_ms(),
                config.histogram_buckets(),
            );
            let path = config.distribution_chart();
            renderer
                .histogram(&histogram, &path)
                .wrap_err("render latency distribution")?;
            info!(
                "[visualize] {} from {} sample(s)",
                path.display(),
                distribution.samples().len()
            );
            charts.push(path);
        }
        None => {
            info!("[visualize] no latency distribution; skipping histogram");
        }
    }

    Ok(Outputs {
        report: report_path,
        distribution: distribution_path,
        charts,
    })
}
