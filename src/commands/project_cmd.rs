use std::process::ExitCode;

use log::info;

use crate::commands::base_commands::Commands;
use crate::commands::forecast_inputs::resolve_forecast_inputs;
use crate::commands::report_format::format_forecast_summary;
use crate::domain::scenario::SINGLE_SCENARIO_ATTRITION_FLOOR_PCT;
use crate::services::forecast_export::{export_forecast, ForecastData};
use crate::services::forecast_plot::{write_forecast_png, ForecastSeries};
use crate::services::forecast_summary::ForecastSummary;
use crate::services::projection_engine::project;

pub fn project_command(cmd: Commands) -> ExitCode {
    let Commands::Project { forecast } = cmd else {
        return ExitCode::FAILURE;
    };

    let inputs = match resolve_forecast_inputs(&forecast, SINGLE_SCENARIO_ATTRITION_FLOOR_PCT) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Failed to resolve forecast inputs: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rows = match project(&inputs.parameters) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Failed to project forecast: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = export_forecast(
        &forecast.output,
        inputs.format,
        ForecastData::Projection(&rows),
        inputs.labels,
    ) {
        eprintln!("Failed to export forecast: {e}");
        return ExitCode::FAILURE;
    }
    info!("wrote {} rows as {} to {}", rows.len(), inputs.format, forecast.output);

    if let Some(plot_path) = &forecast.plot {
        let series = [ForecastSeries {
            name: "Forecast",
            rows: &rows,
        }];
        if let Err(e) = write_forecast_png(plot_path, &series) {
            eprintln!("Failed to write forecast plot: {e}");
            return ExitCode::FAILURE;
        }
        println!("Forecast plot written to {plot_path}");
    }

    if let Some(summary) = ForecastSummary::from_rows(&rows) {
        println!("{}", format_forecast_summary("Forecast Summary", &summary));
    }
    println!("Forecast written to {}", forecast.output);
    ExitCode::SUCCESS
}
