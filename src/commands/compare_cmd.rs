use std::process::ExitCode;

use log::info;

use crate::commands::base_commands::Commands;
use crate::commands::forecast_inputs::resolve_forecast_inputs;
use crate::commands::report_format::format_comparison_summary;
use crate::domain::scenario::{Scenario, COMPARISON_ATTRITION_FLOOR_PCT};
use crate::services::forecast_export::{export_forecast, ForecastData};
use crate::services::forecast_plot::{write_forecast_png, ForecastSeries};
use crate::services::forecast_summary::ForecastSummary;
use crate::services::scenario_comparison::compare;

pub fn compare_command(cmd: Commands) -> ExitCode {
    let Commands::Compare {
        forecast,
        scenarios,
        price_adjustment,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let inputs = match resolve_forecast_inputs(&forecast, COMPARISON_ATTRITION_FLOOR_PCT) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Failed to resolve forecast inputs: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Flags, then config file, then the built-in set.
    let scenarios = if scenarios.is_empty() {
        inputs
            .config
            .scenarios
            .clone()
            .unwrap_or_else(Scenario::default_set)
    } else {
        scenarios
    };
    let price_adjustment = price_adjustment
        .or(inputs.config.price_adjustment_pct)
        .unwrap_or(0.0);

    let comparison = match compare(&inputs.parameters, &scenarios, price_adjustment) {
        Ok(comparison) => comparison,
        Err(e) => {
            eprintln!("Failed to compare scenarios: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = export_forecast(
        &forecast.output,
        inputs.format,
        ForecastData::Comparison(&comparison),
        inputs.labels,
    ) {
        eprintln!("Failed to export scenario comparison: {e}");
        return ExitCode::FAILURE;
    }
    info!(
        "wrote {} scenarios as {} to {}",
        comparison.projections.len(),
        inputs.format,
        forecast.output
    );

    if let Some(plot_path) = &forecast.plot {
        let series: Vec<ForecastSeries<'_>> = comparison
            .projections
            .iter()
            .map(|projection| ForecastSeries {
                name: &projection.name,
                rows: &projection.rows,
            })
            .collect();
        if let Err(e) = write_forecast_png(plot_path, &series) {
            eprintln!("Failed to write comparison plot: {e}");
            return ExitCode::FAILURE;
        }
        println!("Comparison plot written to {plot_path}");
    }

    let summaries: Vec<(&str, ForecastSummary)> = comparison
        .projections
        .iter()
        .filter_map(|projection| {
            ForecastSummary::from_rows(&projection.rows)
                .map(|summary| (projection.name.as_str(), summary))
        })
        .collect();
    println!("{}", format_comparison_summary(&summaries));
    println!(
        "Comparison of {} scenarios written to {}",
        comparison.projections.len(),
        forecast.output
    );
    ExitCode::SUCCESS
}
