use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::domain::projection::ProjectionRow;

#[derive(Error, Debug)]
pub enum ForecastPlotError {
    #[error("forecast data is empty")]
    EmptyForecast,
    #[error("period {0} is beyond the plottable range")]
    PeriodOutOfRange(usize),
    #[error("failed to render forecast plot: {0}")]
    Render(String),
}

fn period_coordinate(period: usize) -> Result<i32, ForecastPlotError> {
    i32::try_from(period).map_err(|_| ForecastPlotError::PeriodOutOfRange(period))
}

/// One line per chart: a scenario name and its rows.
#[derive(Debug, Clone, Copy)]
pub struct ForecastSeries<'a> {
    pub name: &'a str,
    pub rows: &'a [ProjectionRow],
}

const SERIES_COLORS: [RGBColor; 5] = [
    RGBColor(30, 122, 204),
    RGBColor(214, 96, 77),
    RGBColor(67, 160, 71),
    RGBColor(142, 68, 173),
    RGBColor(243, 156, 18),
];

#[derive(Debug, Clone, Copy)]
enum Metric {
    Price,
    Attrition,
    Revenue,
}

impl Metric {
    const ALL: [Metric; 3] = [Metric::Price, Metric::Attrition, Metric::Revenue];

    fn title(self) -> &'static str {
        match self {
            Metric::Price => "Price per Subscriber",
            Metric::Attrition => "Attrition Rate",
            Metric::Revenue => "Revenue",
        }
    }

    fn axis_label(self) -> &'static str {
        match self {
            Metric::Price => "Price",
            Metric::Attrition => "Attrition (%)",
            Metric::Revenue => "Revenue",
        }
    }

    fn value(self, row: &ProjectionRow) -> f64 {
        match self {
            Metric::Price => row.price_per_unit,
            Metric::Attrition => row.attrition_rate_pct,
            Metric::Revenue => row.revenue,
        }
    }
}

/// Renders price, attrition and revenue side by side into a PNG file.
pub fn write_forecast_png(
    output_path: &str,
    series: &[ForecastSeries<'_>],
) -> Result<(), ForecastPlotError> {
    if series.iter().all(|item| item.rows.is_empty()) {
        return Err(ForecastPlotError::EmptyForecast);
    }

    let root = BitMapBackend::new(output_path, (1500, 500)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;

    let panels = root.split_evenly((1, 3));
    for (panel, metric) in panels.iter().zip(Metric::ALL) {
        draw_metric(panel, metric, series)?;
    }

    root.present()
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;
    Ok(())
}

fn draw_metric(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    metric: Metric,
    series: &[ForecastSeries<'_>],
) -> Result<(), ForecastPlotError> {
    let max_period = period_coordinate(
        series
            .iter()
            .flat_map(|item| item.rows.iter().map(|row| row.period))
            .max()
            .unwrap_or(1),
    )?;
    let max_value = series
        .iter()
        .flat_map(|item| item.rows.iter().map(|row| metric.value(row)))
        .fold(0.0_f64, f64::max);
    let max_y = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .caption(metric.title(), ("sans-serif", 26))
        .x_label_area_size(45)
        .y_label_area_size(90)
        .build_cartesian_2d(0..max_period.saturating_add(1), 0.0..max_y)
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Period")
        .y_desc(metric.axis_label())
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;

    for (index, item) in series.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        let points = item
            .rows
            .iter()
            .map(|row| Ok((period_coordinate(row.period)?, metric.value(row))))
            .collect::<Result<Vec<_>, ForecastPlotError>>()?;
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(|e| ForecastPlotError::Render(e.to_string()))?
            .label(item.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| ForecastPlotError::Render(e.to_string()))?;
    }
    Ok(())
}
