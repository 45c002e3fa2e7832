//! PNG rendering of the log-log error charts.

use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::{Marker, PlotSeries};

/// 8×5 inches at 200 DPI.
pub const CHART_WIDTH: u32 = 1600;
pub const CHART_HEIGHT: u32 = 1000;

// First three colors of the tab10 cycle.
const PALETTE: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

/// Render one log-log chart to `path`, overwriting any prior file.
///
/// Series with zero plottable points are skipped (no legend entry either).
/// An all-empty chart still produces a valid image with axes, so a run on a
/// fully degraded file leaves an inspectable artifact rather than nothing.
pub fn render_loglog_png(
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[PlotSeries],
) -> Result<(), AppError> {
    let drawable: Vec<&PlotSeries> = series.iter().filter(|s| !s.points.is_empty()).collect();
    let (x_range, y_range) = log_bounds(&drawable);

    let err = |e: String| AppError::render(format!("Failed to render '{}': {e}", path.display()));

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| err(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .build_cartesian_2d(
            (x_range.0..x_range.1).log_scale(),
            (y_range.0..y_range.1).log_scale(),
        )
        .map_err(|e| err(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        // Light mesh so the grid stays in the background of the data.
        .light_line_style(BLACK.mix(0.10))
        .bold_line_style(BLACK.mix(0.25))
        .x_label_formatter(&|v| format!("{v:.0e}"))
        .y_label_formatter(&|v| format!("{v:.0e}"))
        .label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 24))
        .draw()
        .map_err(|e| err(e.to_string()))?;

    for (i, s) in drawable.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let line_style = color.stroke_width(2);

        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), line_style))
            .map_err(|e| err(e.to_string()))?
            .label(s.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x - 12, y), (x + 12, y)], line_style)
            });

        match s.marker {
            Marker::Circle => chart
                .draw_series(
                    s.points
                        .iter()
                        .map(|&p| Circle::new(p, 5, color.filled())),
                )
                .map_err(|e| err(e.to_string()))?,
            Marker::Cross => chart
                .draw_series(
                    s.points
                        .iter()
                        .map(|&p| Cross::new(p, 5, color.stroke_width(2))),
                )
                .map_err(|e| err(e.to_string()))?,
            Marker::Triangle => chart
                .draw_series(
                    s.points
                        .iter()
                        .map(|&p| TriangleMarker::new(p, 6, color.filled())),
                )
                .map_err(|e| err(e.to_string()))?,
        };
    }

    if !drawable.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .border_style(BLACK.mix(0.4))
            .background_style(WHITE.mix(0.85))
            .label_font(("sans-serif", 22))
            .draw()
            .map_err(|e| err(e.to_string()))?;
    }

    root.present().map_err(|e| err(e.to_string()))?;
    Ok(())
}

/// Axis bounds over every drawable point, padded by half a decade so markers
/// never sit on the frame. Falls back to a fixed window for an empty chart.
fn log_bounds(series: &[&PlotSeries]) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for s in series {
        for &(x, y) in &s.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return ((1e-16, 1e-3), (1e-18, 1.0));
    }

    const PAD: f64 = 3.162_277_660_168_379_5; // 10^0.5
    ((x_min / PAD, x_max * PAD), (y_min / PAD, y_max * PAD))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_series_with_padding() {
        let a = PlotSeries::new("a", Marker::Circle, vec![(1e-8, 1e-10), (1e-4, 1e-2)]);
        let b = PlotSeries::new("b", Marker::Cross, vec![(1e-9, 1e-12)]);
        let ((x0, x1), (y0, y1)) = log_bounds(&[&a, &b]);
        assert!(x0 < 1e-9 && x1 > 1e-4);
        assert!(y0 < 1e-12 && y1 > 1e-2);
    }

    #[test]
    fn empty_chart_gets_fallback_bounds() {
        let ((x0, x1), (y0, y1)) = log_bounds(&[]);
        assert!(x0 > 0.0 && x1 > x0);
        assert!(y0 > 0.0 && y1 > y0);
    }
}
