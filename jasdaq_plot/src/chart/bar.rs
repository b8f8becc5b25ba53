use crate::fmt::{MetricKind, PlotFmt};
use crate::table::MetricRow;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub height: f64,
}

/// Vertical bar chart: one bar per metric, categories on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    title: &'static str,
    y_label: &'static str,
    bars: Vec<Bar>,
}

impl BarChart {
    pub fn new<'a>(
        kind: MetricKind,
        rows: impl IntoIterator<Item = &'a MetricRow>,
    ) -> Self {
        let bars = rows
            .into_iter()
            .map(|row| Bar {
                label: row.metric.clone(),
                // missing values keep their slot but draw no bar
                height: row.value.unwrap_or(f64::NAN),
            })
            .collect();
        Self {
            title: PlotFmt::title(kind),
            y_label: PlotFmt::y_label(kind),
            bars,
        }
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn y_label(&self) -> &str {
        self.y_label
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Range of the value axis: always includes zero and leaves 5% headroom
    /// past the tallest bar. Degenerate charts get `0..1`.
    pub fn y_range(&self) -> Range<f64> {
        let heights = self.bars.iter().map(|bar| bar.height);
        let heights = heights.filter(|height| height.is_finite());
        let (low, high) = heights
            .fold((0f64, 0f64), |(low, high), h| (low.min(h), high.max(h)));
        if low == high {
            return 0.0..1.0;
        }
        let headroom = (high - low) * 0.05;
        let low = if low < 0.0 { low - headroom } else { low };
        let high = if high > 0.0 { high + headroom } else { high };
        low..high
    }

    /// Number of characters in the longest category label; used to size the
    /// label area below the plot.
    pub fn longest_label(&self) -> usize {
        self.bars
            .iter()
            .map(|bar| bar.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}
