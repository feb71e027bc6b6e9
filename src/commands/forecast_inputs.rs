use thiserror::Error;

use crate::commands::base_commands::ForecastArgs;
use crate::domain::scenario::ScenarioParameters;
use crate::services::forecast_config::{
    load_forecast_config_from_yaml_file, parse_start_month, ForecastConfig, ForecastConfigError,
};
use crate::services::forecast_export::{ExportError, ExportFormat};
use crate::services::forecast_table::PeriodLabels;

#[derive(Error, Debug)]
pub enum ForecastInputError {
    #[error(transparent)]
    Config(#[from] ForecastConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("start month {start_month} cannot label {horizon_periods} periods")]
    StartMonthOutOfRange {
        start_month: String,
        horizon_periods: usize,
    },
}

/// Inputs of a forecast run after layering defaults, config file and flags.
#[derive(Debug, Clone)]
pub struct ForecastInputs {
    pub config: ForecastConfig,
    pub parameters: ScenarioParameters,
    pub labels: PeriodLabels,
    pub format: ExportFormat,
}

pub fn resolve_forecast_inputs(
    args: &ForecastArgs,
    attrition_floor_pct: f64,
) -> Result<ForecastInputs, ForecastInputError> {
    let config = match &args.config {
        Some(path) => load_forecast_config_from_yaml_file(path)?,
        None => ForecastConfig::default(),
    };

    let mut parameters = ScenarioParameters {
        attrition_floor_pct,
        ..ScenarioParameters::default()
    };
    config.parameters.apply_to(&mut parameters);
    args.parameter_overrides().apply_to(&mut parameters);

    let start_month = match &args.start_month {
        Some(value) => Some(parse_start_month(value)?),
        None => config.start_month,
    };
    let labels = PeriodLabels::from_start_month(start_month);
    if let PeriodLabels::Months(start) = labels
        && !labels.covers(parameters.horizon_periods)
    {
        return Err(ForecastInputError::StartMonthOutOfRange {
            start_month: start.format("%Y-%m").to_string(),
            horizon_periods: parameters.horizon_periods,
        });
    }
    let format = match args.format {
        Some(format) => format,
        None => ExportFormat::from_path(&args.output)?,
    };

    Ok(ForecastInputs {
        config,
        parameters,
        labels,
        format,
    })
}
