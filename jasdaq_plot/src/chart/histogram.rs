use crate::fmt::PlotFmt;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Equal-width histogram of latencies (in milliseconds).
///
/// Bucket `i` covers `[edges[i], edges[i + 1])`, except the last one which
/// also includes its right edge. The range is taken from the data: all-equal
/// input is widened by half a unit on each side, and empty input uses `0..1`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyHistogram {
    edges: Vec<f64>,
    counts: Vec<u64>,
}

impl LatencyHistogram {
    pub fn new(
        values: impl IntoIterator<Item = f64>,
        buckets: NonZeroUsize,
    ) -> Self {
        let buckets = buckets.get();
        let values: Vec<_> =
            values.into_iter().filter(|value| value.is_finite()).collect();

        // compute range
        let (low, high) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(low, high), &value| (low.min(value), high.max(value)),
        );
        let (low, high) = if values.is_empty() {
            (0.0, 1.0)
        } else if low == high {
            (low - 0.5, high + 0.5)
        } else {
            (low, high)
        };

        // compute edges
        let width = (high - low) / buckets as f64;
        let mut edges: Vec<_> =
            (0..buckets).map(|i| low + i as f64 * width).collect();
        edges.push(high);

        // fill buckets
        let mut counts = vec![0; buckets];
        for value in values {
            // `high` itself lands in the last bucket
            let mut index = (((value - low) / width) as usize).min(buckets - 1);
            // rounding may put the estimate off by one; settle against edges
            while index > 0 && value < edges[index] {
                index -= 1;
            }
            while index < buckets - 1 && value >= edges[index + 1] {
                index += 1;
            }
            counts[index] += 1;
        }

        Self { edges, counts }
    }

    pub fn title(&self) -> &str {
        PlotFmt::distribution_title()
    }

    pub fn x_label(&self) -> &str {
        PlotFmt::distribution_x_label()
    }

    pub fn y_label(&self) -> &str {
        PlotFmt::distribution_y_label()
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Iterates buckets as `(range, count)` pairs.
    pub fn buckets(&self) -> impl Iterator<Item = (Range<f64>, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0]..edge[1], count))
    }

    pub fn x_range(&self) -> Range<f64> {
        let low = self.edges.first().copied().unwrap_or(0.0);
        let high = self.edges.last().copied().unwrap_or(1.0);
        low..high
    }

    /// Frequency axis: zero up to the fullest bucket plus 5%, never empty.
    pub fn y_range(&self) -> Range<f64> {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            0.0..1.0
        } else {
            0.0..(max as f64 * 1.05)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn buckets(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero buckets")
    }

    #[test]
    fn fifty_buckets() {
        let histogram = LatencyHistogram::new(vec![0.0, 5.0, 10.0], buckets(50));
        assert_eq!(histogram.counts().len(), buckets(50).get());
        assert_eq!(histogram.edges().len(), 51);
        assert_eq!(histogram.x_range(), 0.0..10.0);
        // bucket width is 0.2
        assert_eq!(histogram.counts()[0], 1);
        assert_eq!(histogram.counts()[25], 1);
        // the maximum is counted in the last bucket
        assert_eq!(histogram.counts()[49], 1);
        assert_eq!(histogram.counts().iter().sum::<u64>(), 3);
    }

    #[test]
    fn nanoseconds_to_milliseconds() {
        let ns = vec![1_000_000f64, 2_000_000f64, 3_000_000f64];
        let histogram = LatencyHistogram::new(ns.iter().map(|n| n / 1e6), buckets(50));
        assert_eq!(histogram.x_range(), 1.0..3.0);
    }

    #[test]
    fn single_value() {
        let histogram = LatencyHistogram::new(vec![2.0, 2.0], buckets(50));
        assert_eq!(histogram.x_range(), 1.5..2.5);
        assert_eq!(histogram.counts()[25], 2);
        assert_eq!(histogram.y_range(), 0.0..2.1);
    }

    #[test]
    fn no_values() {
        let histogram = LatencyHistogram::new(Vec::new(), buckets(50));
        assert_eq!(histogram.counts().len(), buckets(50).get());
        assert_eq!(histogram.x_range(), 0.0..1.0);
        assert!(histogram.counts().iter().all(|&count| count == 0));
        assert_eq!(histogram.y_range(), 0.0..1.0);
    }

    #[test]
    fn non_finite_values_ignored() {
        let values = vec![f64::NAN, 1.0, f64::INFINITY, 3.0];
        let histogram = LatencyHistogram::new(values, buckets(50));
        assert_eq!(histogram.x_range(), 1.0..3.0);
        assert_eq!(histogram.counts().iter().sum::<u64>(), 2);
    }

    #[test]
    fn labels() {
        let histogram = LatencyHistogram::new(vec![1.0], buckets(50));
        assert_eq!(histogram.title(), "Latency Distribution");
        assert_eq!(histogram.x_label(), "Latency (ms)");
        assert_eq!(histogram.y_label(), "Frequency");
    }

    #[test]
    fn one_bucket() {
        let histogram = LatencyHistogram::new(vec![1.0, 2.0, 3.0], buckets(1));
        assert_eq!(histogram.edges(), &[1.0, 3.0]);
        assert_eq!(histogram.counts(), &[3]);
    }

    #[quickcheck]
    fn every_value_is_counted_once(values: Vec<u32>) -> bool {
        let values: Vec<_> = values.into_iter().map(|v| v as f64).collect();
        let histogram = LatencyHistogram::new(values.clone(), buckets(50));
        histogram.counts().len() == 50
            && histogram.counts().iter().sum::<u64>() == values.len() as u64
    }

    #[quickcheck]
    fn values_fall_in_their_bucket(values: Vec<u16>) -> bool {
        let values: Vec<_> = values.into_iter().map(|v| v as f64).collect();
        let histogram = LatencyHistogram::new(values.clone(), buckets(50));
        let buckets: Vec<_> = histogram.buckets().collect();
        let last = buckets.len() - 1;
        values.iter().all(|&value| {
            buckets.iter().enumerate().any(|(index, (range, count))| {
                *count > 0
                    && (range.contains(&value)
                        || (index == last && value == range.end))
            })
        })
    }
}
