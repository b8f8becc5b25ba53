use plotters::style::RGBColor;

/// The two bar charts drawn from the main report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Latency,
    Throughput,
}

impl MetricKind {
    pub fn all() -> [MetricKind; 2] {
        [MetricKind::Latency, MetricKind::Throughput]
    }

    /// Substring a metric name must contain to be drawn in this chart.
    pub fn needle(&self) -> &'static str {
        match self {
            MetricKind::Latency => "Latency",
            MetricKind::Throughput => "Throughput",
        }
    }
}

pub struct PlotFmt;

impl PlotFmt {
    pub fn title(kind: MetricKind) -> &'static str {
        match kind {
            MetricKind::Latency => "Latency Metrics",
            MetricKind::Throughput => "Throughput Metrics",
        }
    }

    pub fn y_label(kind: MetricKind) -> &'static str {
        match kind {
            MetricKind::Latency => "Time (ms)",
            MetricKind::Throughput => "Orders/Second",
        }
    }

    pub fn distribution_title() -> &'static str {
        "Latency Distribution"
    }

    pub fn distribution_x_label() -> &'static str {
        "Latency (ms)"
    }

    pub fn distribution_y_label() -> &'static str {
        "Frequency"
    }

    // matplotlib's default blue
    pub fn bar_color() -> RGBColor {
        RGBColor(0x1f, 0x77, 0xb4)
    }

    pub fn histogram_opacity() -> f64 {
        0.75
    }

    pub fn grid_opacity() -> f64 {
        0.3
    }

    pub fn font_family() -> &'static str {
        "sans-serif"
    }

    pub fn title_font_size() -> u32 {
        24
    }

    pub fn label_font_size() -> u32 {
        16
    }
}
