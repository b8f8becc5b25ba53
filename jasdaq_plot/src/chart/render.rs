use crate::chart::bar::BarChart;
use crate::chart::font::Typeface;
use crate::chart::histogram::LatencyHistogram;
use crate::fmt::PlotFmt;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::TRANSPARENT;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

type Plot<'a, 'b> = ChartContext<
    'a,
    BitMapBackend<'b>,
    Cartesian2d<RangedCoordf64, RangedCoordf64>,
>;

// bars only occupy 80% of their category slot
const BAR_WIDTH: f64 = 0.8;

// rough width of a glyph relative to the font size
const GLYPH_WIDTH: f64 = 0.6;

const MARGIN: u32 = 20;
const Y_LABEL_AREA: u32 = 90;
const X_LABEL_AREA: u32 = 60;
// without text there's nothing to make room for
const BARE_LABEL_AREA: u32 = 10;

/// Draws charts as PNG images of a fixed size; existing files are
/// overwritten.
pub struct Renderer {
    size: (u32, u32),
    text: bool,
}

impl Renderer {
    pub fn new(size: (u32, u32), typeface: &Typeface) -> Self {
        Self {
            size,
            text: typeface.is_available(),
        }
    }

    pub fn bar_chart(&self, chart: &BarChart, path: &Path) -> Result<(), Report> {
        debug!(
            "[render] {} bar(s) of {:?} to {}",
            chart.bars().len(),
            chart.title(),
            path.display()
        );
        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        // one slot per bar; an empty chart still gets an (empty) slot
        let slots = chart.bars().len().max(1);
        let x_range = -0.5..(slots as f64 - 0.5);
        let y_range = chart.y_range();

        let mut builder = ChartBuilder::on(&root);
        builder.margin(MARGIN);
        if self.text {
            builder
                .caption(chart.title(), font(PlotFmt::title_font_size()))
                .x_label_area_size(self.category_label_area(chart))
                .y_label_area_size(Y_LABEL_AREA);
        } else {
            builder
                .x_label_area_size(BARE_LABEL_AREA)
                .y_label_area_size(BARE_LABEL_AREA);
        }
        let mut plot =
            builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

        if self.text {
            plot.configure_mesh()
                .disable_x_mesh()
                .disable_x_axis()
                .y_desc(chart.y_label())
                .y_label_style(font(PlotFmt::label_font_size()))
                .axis_desc_style(font(PlotFmt::label_font_size()))
                .draw()?;
        }
        draw_frame(&mut plot, &x_range, &y_range)?;

        let color = PlotFmt::bar_color();
        let half = BAR_WIDTH / 2.0;
        plot.draw_series(
            chart
                .bars()
                .iter()
                .enumerate()
                .filter(|(_, bar)| bar.height.is_finite())
                .map(|(x, bar)| {
                    let x = x as f64;
                    Rectangle::new(
                        [(x - half, 0.0), (x + half, bar.height)],
                        color.filled(),
                    )
                }),
        )?;

        // category labels run down and to the left at 45 degrees, ending
        // under their bar, so long metric names don't overlap
        if self.text {
            let size = PlotFmt::label_font_size();
            for (x, bar) in chart.bars().iter().enumerate() {
                let (px, py) = plot.backend_coord(&(x as f64, y_range.start));
                let anchor = (px, py + 8);
                for (glyph, at) in diagonal_glyphs(&bar.label, anchor, size) {
                    root.draw(&Text::new(glyph.to_string(), at, font(size)))?;
                }
            }
        }

        root.present()
            .wrap_err_with(|| format!("write chart {}", path.display()))?;
        Ok(())
    }

    pub fn histogram(
        &self,
        histogram: &LatencyHistogram,
        path: &Path,
    ) -> Result<(), Report> {
        debug!(
            "[render] {} bucket(s) of {:?} to {}",
            histogram.counts().len(),
            histogram.title(),
            path.display()
        );
        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let x_range = histogram.x_range();
        let y_range = histogram.y_range();

        let mut builder = ChartBuilder::on(&root);
        builder.margin(MARGIN);
        if self.text {
            builder
                .caption(histogram.title(), font(PlotFmt::title_font_size()))
                .x_label_area_size(X_LABEL_AREA)
                .y_label_area_size(Y_LABEL_AREA);
        } else {
            builder
                .x_label_area_size(BARE_LABEL_AREA)
                .y_label_area_size(BARE_LABEL_AREA);
        }
        let mut plot =
            builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

        if self.text {
            plot.configure_mesh()
                .bold_line_style(BLACK.mix(PlotFmt::grid_opacity()))
                .light_line_style(TRANSPARENT)
                .x_desc(histogram.x_label())
                .y_desc(histogram.y_label())
                .x_label_formatter(&|x| format!("{:.2}", x))
                .y_label_formatter(&|y| format!("{:.0}", y))
                .x_label_style(font(PlotFmt::label_font_size()))
                .y_label_style(font(PlotFmt::label_font_size()))
                .axis_desc_style(font(PlotFmt::label_font_size()))
                .draw()?;
        }
        draw_frame(&mut plot, &x_range, &y_range)?;

        let color = PlotFmt::bar_color().mix(PlotFmt::histogram_opacity());
        plot.draw_series(
            histogram
                .buckets()
                .filter(|(_, count)| *count > 0)
                .map(|(bucket, count)| {
                    Rectangle::new(
                        [(bucket.start, 0.0), (bucket.end, count as f64)],
                        color.filled(),
                    )
                }),
        )?;

        root.present()
            .wrap_err_with(|| format!("write chart {}", path.display()))?;
        Ok(())
    }

    // room for the longest (diagonal) category label, up to half the image
    fn category_label_area(&self, chart: &BarChart) -> u32 {
        let size = PlotFmt::label_font_size();
        let step = glyph_step(size);
        let run = (chart.longest_label() as f64 * step).ceil() as u32;
        let needed = run + size + 20;
        needed.max(X_LABEL_AREA).min(self.size.1 / 2)
    }
}

// how far each glyph of a 45 degree label moves along both axes
fn glyph_step(size: u32) -> f64 {
    size as f64 * GLYPH_WIDTH * std::f64::consts::FRAC_1_SQRT_2
}

/// Positions for each glyph of `label` laid along a 45 degree diagonal that
/// ends, top right, at `anchor`.
fn diagonal_glyphs(
    label: &str,
    anchor: (i32, i32),
    size: u32,
) -> Vec<(char, (i32, i32))> {
    let step = glyph_step(size);
    let count = label.chars().count();
    label
        .chars()
        .enumerate()
        .map(|(i, glyph)| {
            // distance from the end of the label, along both axes
            let offset = ((count - 1 - i) as f64 * step).round() as i32;
            let x = anchor.0 - step.round() as i32 - offset;
            (glyph, (x, anchor.1 + offset))
        })
        .collect()
}

fn font(size: u32) -> FontDesc<'static> {
    (PlotFmt::font_family(), size).into_font()
}

// left and bottom axis lines
fn draw_frame(
    plot: &mut Plot<'_, '_>,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
) -> Result<(), Report> {
    let corner = (x_range.start, y_range.start);
    plot.draw_series(std::iter::once(PathElement::new(
        vec![
            (x_range.start, y_range.end),
            corner,
            (x_range.end, y_range.start),
        ],
        BLACK,
    )))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::font;
    use crate::config::Config;
    use crate::fmt::MetricKind;
    use crate::table::MetricRow;
    use std::fs;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn is_png(path: &Path) -> bool {
        fs::read(path)
            .map(|bytes| bytes.starts_with(PNG_MAGIC))
            .unwrap_or(false)
    }

    fn rows() -> Vec<MetricRow> {
        vec![
            MetricRow {
                metric: String::from("P50 Latency"),
                value: Some(1.2),
            },
            MetricRow {
                metric: String::from("P99 Latency"),
                value: Some(5.6),
            },
        ]
    }

    #[test]
    fn bar_chart_without_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latency_chart.png");
        let renderer = Renderer::new((1000, 600), &Typeface::Unavailable);

        let chart = BarChart::new(MetricKind::Latency, &rows());
        renderer.bar_chart(&chart, &path).expect("render");
        assert!(is_png(&path));

        // an empty chart still renders, overwriting the previous one
        let chart = BarChart::new(MetricKind::Latency, &[]);
        renderer.bar_chart(&chart, &path).expect("render");
        assert!(is_png(&path));
    }

    #[test]
    fn charts_with_system_typeface() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::new(dir.path());
        // falls back to no text when the machine has no fonts
        let typeface = font::typeface(config.font_dirs());
        let renderer = Renderer::new(config.image_size(), typeface);

        let chart = BarChart::new(MetricKind::Latency, &rows());
        renderer
            .bar_chart(&chart, &config.latency_chart())
            .expect("render bar chart");
        assert!(is_png(&config.latency_chart()));

        let histogram = LatencyHistogram::new(
            vec![0.5, 1.0, 1.0, 2.5],
            config.histogram_buckets(),
        );
        renderer
            .histogram(&histogram, &config.distribution_chart())
            .expect("render histogram");
        assert!(is_png(&config.distribution_chart()));
    }

    #[test]
    fn histogram_without_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latency_distribution.png");
        let renderer = Renderer::new((1000, 600), &Typeface::Unavailable);

        let buckets = Config::default().histogram_buckets();
        let histogram = LatencyHistogram::new(Vec::new(), buckets);
        renderer.histogram(&histogram, &path).expect("render");
        assert!(is_png(&path));
    }

    #[test]
    fn unwritable_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("chart.png");
        let renderer = Renderer::new((1000, 600), &Typeface::Unavailable);
        let chart = BarChart::new(MetricKind::Throughput, &[]);
        assert!(renderer.bar_chart(&chart, &path).is_err());
    }

    #[test]
    fn label_area_is_bounded() {
        let renderer = Renderer::new((1000, 600), &Typeface::Unavailable);
        let short = BarChart::new(MetricKind::Latency, &rows());
        // 11 characters stepping ~6.8px down each, one glyph tall, padding
        assert_eq!(renderer.category_label_area(&short), 111);

        let long = vec![MetricRow {
            metric: "Latency".repeat(100),
            value: Some(1.0),
        }];
        let long = BarChart::new(MetricKind::Latency, &long);
        assert_eq!(renderer.category_label_area(&long), 300);
    }

    #[test]
    fn labels_run_diagonally() {
        let glyphs = diagonal_glyphs("abc", (100, 50), 16);
        let chars: Vec<_> = glyphs.iter().map(|(glyph, _)| *glyph).collect();
        assert_eq!(chars, vec!['a', 'b', 'c']);

        // the last glyph sits just left of the anchor, on its row
        assert_eq!(glyphs[2].1, (93, 50));
        // each earlier glyph is one step further left and down
        for pair in glyphs.windows(2) {
            let ((_, (x0, y0)), (_, (x1, y1))) = (pair[0], pair[1]);
            assert_eq!(x1 - x0, y0 - y1);
            assert!(x1 > x0);
        }
        assert!(diagonal_glyphs("", (0, 0), 16).is_empty());
    }
}
