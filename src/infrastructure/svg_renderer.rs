// SVG chart rendering with plotters
use crate::domain::chart::ChartSeries;
use crate::error::ChartError;
use crate::infrastructure::config::ChartSettings;
use plotters::prelude::*;

const LINE_COLOR: RGBColor = RGBColor(54, 162, 235);
const PEAK_COLOR: RGBColor = RGBColor(255, 99, 132);
const PEAK_RADIUS: i32 = 5;
const X_LABELS: usize = 6;

#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    title: String,
    unit: String,
    width: u32,
    height: u32,
}

impl SvgChartRenderer {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            title: settings.title.clone(),
            unit: settings.unit.clone(),
            width: settings.width.max(1),
            height: settings.height.max(1),
        }
    }

    /// Draw the temperature line with the peaks as unconnected markers.
    pub fn render(&self, series: &ChartSeries) -> Result<String, ChartError> {
        let (y_min, y_max) = value_range(&series.temperatures)?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            let x_end = series.len().saturating_sub(1).max(1);

            let mut chart = ChartBuilder::on(&root)
                .caption(&self.title, ("sans-serif", 20))
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d(0usize..x_end, y_min..y_max)
                .map_err(render_error)?;

            let label_for = |idx: &usize| series.labels.get(*idx).cloned().unwrap_or_default();
            chart
                .configure_mesh()
                .x_labels(X_LABELS)
                .x_label_formatter(&label_for)
                .y_desc(self.unit.as_str())
                .draw()
                .map_err(render_error)?;

            chart
                .draw_series(LineSeries::new(
                    series.temperatures.iter().copied().enumerate(),
                    LINE_COLOR.stroke_width(2),
                ))
                .map_err(render_error)?;

            chart
                .draw_series(series.peak_overlay.iter().enumerate().filter_map(
                    |(idx, value)| {
                        value.map(|v| Circle::new((idx, v), PEAK_RADIUS, PEAK_COLOR.filled()))
                    },
                ))
                .map_err(render_error)?;

            root.present().map_err(render_error)?;
        }
        Ok(svg)
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Y range padded by 10% of the span on each side. A flat series is
/// widened by 10% of its magnitude, at least one unit. Empty input gets a
/// unit range; a range too wide to represent is a render error.
fn value_range(values: &[f64]) -> Result<(f64, f64), ChartError> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return Ok((0.0, 1.0));
    }

    // Halves keep the midpoint and half-span finite for any finite input.
    let center = min / 2.0 + max / 2.0;
    let half = max / 2.0 - min / 2.0;

    let (mut lo, mut hi) = (center - half * 1.2, center + half * 1.2);
    if lo >= hi {
        let pad = (center.abs() * 0.1).max(1.0);
        (lo, hi) = (center - pad, center + pad);
    }

    if lo.is_finite() && hi.is_finite() && lo < hi && (hi - lo).is_finite() {
        Ok((lo, hi))
    } else {
        Err(ChartError::Render(format!(
            "temperature range {} to {} cannot be charted",
            min, max
        )))
    }
}
