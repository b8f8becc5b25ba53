use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

// FIXED
const REPORTS_DIR: &str = "benchmark-reports";
const REPORT_PATTERN: &str = "benchmark_*.csv";
const DISTRIBUTION_PATTERN: &str = "*_distribution_*.csv";

// chart outputs (overwritten on each run)
const LATENCY_CHART: &str = "latency_chart.png";
const THROUGHPUT_CHART: &str = "throughput_chart.png";
const DISTRIBUTION_CHART: &str = "latency_distribution.png";

// 10x6 inches at 100 dpi
const IMAGE_WIDTH: u32 = 1000;
const IMAGE_HEIGHT: u32 = 600;

const HISTOGRAM_BUCKETS: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(buckets) => buckets,
    None => panic!("zero histogram buckets"),
};

// where to look for a sans-serif typeface; searched in order
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/usr/X11R6/lib/X11/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    reports_dir: PathBuf,
    report_pattern: String,
    distribution_pattern: String,
    latency_chart: String,
    throughput_chart: String,
    distribution_chart: String,
    image_size: (u32, u32),
    histogram_buckets: NonZeroUsize,
    font_dirs: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(REPORTS_DIR)
    }
}

impl Config {
    /// Creates the fixed configuration rooted at `reports_dir`: reports are
    /// read from, and charts written to, this directory.
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            report_pattern: String::from(REPORT_PATTERN),
            distribution_pattern: String::from(DISTRIBUTION_PATTERN),
            latency_chart: String::from(LATENCY_CHART),
            throughput_chart: String::from(THROUGHPUT_CHART),
            distribution_chart: String::from(DISTRIBUTION_CHART),
            image_size: (IMAGE_WIDTH, IMAGE_HEIGHT),
            histogram_buckets: HISTOGRAM_BUCKETS,
            font_dirs: FONT_DIRS.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn report_pattern(&self) -> &str {
        &self.report_pattern
    }

    pub fn distribution_pattern(&self) -> &str {
        &self.distribution_pattern
    }

    pub fn latency_chart(&self) -> PathBuf {
        self.reports_dir.join(&self.latency_chart)
    }

    pub fn throughput_chart(&self) -> PathBuf {
        self.reports_dir.join(&self.throughput_chart)
    }

    pub fn distribution_chart(&self) -> PathBuf {
        self.reports_dir.join(&self.distribution_chart)
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    pub fn histogram_buckets(&self) -> NonZeroUsize {
        self.histogram_buckets
    }

    pub fn font_dirs(&self) -> &[PathBuf] {
        &self.font_dirs
    }

    pub fn set_font_dirs(&mut self, font_dirs: Vec<PathBuf>) -> &mut Self {
        self.font_dirs = font_dirs;
        self
    }
}
