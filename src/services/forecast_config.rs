use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::scenario::{Scenario, ScenarioParameters};

#[derive(Error, Debug)]
pub enum ForecastConfigError {
    #[error("failed to read forecast config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse forecast config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid start month: {0} (expected YYYY-MM)")]
    InvalidStartMonth(String),
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

/// Settings read from a forecast config file. Every field is optional so a
/// file can override only part of the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastConfig {
    pub parameters: ParameterOverrides,
    pub scenarios: Option<Vec<Scenario>>,
    pub price_adjustment_pct: Option<f64>,
    pub start_month: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterOverrides {
    pub horizon_periods: Option<usize>,
    pub starting_population: Option<f64>,
    pub base_price_per_unit: Option<f64>,
    pub price_growth_pct_per_period: Option<f64>,
    pub base_attrition_pct_per_period: Option<f64>,
    pub attrition_trend_bps_per_period: Option<f64>,
    pub attrition_floor_pct: Option<f64>,
}

impl ParameterOverrides {
    /// Overwrites the fields of `params` that are set here.
    pub fn apply_to(&self, params: &mut ScenarioParameters) {
        if let Some(value) = self.horizon_periods {
            params.horizon_periods = value;
        }
        if let Some(value) = self.starting_population {
            params.starting_population = value;
        }
        if let Some(value) = self.base_price_per_unit {
            params.base_price_per_unit = value;
        }
        if let Some(value) = self.price_growth_pct_per_period {
            params.price_growth_pct_per_period = value;
        }
        if let Some(value) = self.base_attrition_pct_per_period {
            params.base_attrition_pct_per_period = value;
        }
        if let Some(value) = self.attrition_trend_bps_per_period {
            params.attrition_trend_bps_per_period = value;
        }
        if let Some(value) = self.attrition_floor_pct {
            params.attrition_floor_pct = value;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ForecastConfigRecord {
    #[serde(default)]
    parameters: ParameterOverrides,
    scenarios: Option<Vec<ScenarioRecord>>,
    price_adjustment_pct: Option<f64>,
    start_month: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioRecord {
    name: String,
    #[serde(default)]
    attrition_delta_pct: f64,
}

pub fn load_forecast_config_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<ForecastConfig, ForecastConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ForecastConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_forecast_config_from_yaml_str(&contents)
}

pub fn deserialize_forecast_config_from_yaml_str(
    yaml: &str,
) -> Result<ForecastConfig, ForecastConfigError> {
    if yaml.trim().is_empty() {
        return Ok(ForecastConfig::default());
    }
    let record: ForecastConfigRecord = serde_yaml::from_str(yaml)?;

    let scenarios = record
        .scenarios
        .map(|records| {
            records
                .into_iter()
                .map(|record| {
                    if record.name.trim().is_empty() {
                        return Err(ForecastConfigError::InvalidScenario(
                            "scenario name must not be empty".to_string(),
                        ));
                    }
                    Ok(Scenario::new(record.name, record.attrition_delta_pct))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let start_month = record
        .start_month
        .as_deref()
        .map(parse_start_month)
        .transpose()?;

    Ok(ForecastConfig {
        parameters: record.parameters,
        scenarios,
        price_adjustment_pct: record.price_adjustment_pct,
        start_month,
    })
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_start_month(value: &str) -> Result<NaiveDate, ForecastConfigError> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| ForecastConfigError::InvalidStartMonth(value.to_string()))
}

/// Parses a `NAME=DELTA` scenario argument.
pub fn parse_scenario_arg(value: &str) -> Result<Scenario, ForecastConfigError> {
    let (name, delta) = value.rsplit_once('=').ok_or_else(|| {
        ForecastConfigError::InvalidScenario(format!("{value} (expected NAME=DELTA)"))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ForecastConfigError::InvalidScenario(format!(
            "{value} (scenario name must not be empty)"
        )));
    }
    let delta: f64 = delta.trim().parse().map_err(|_| {
        ForecastConfigError::InvalidScenario(format!("{value} (delta must be a number)"))
    })?;
    Ok(Scenario::new(name, delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::on_month;
    use assert_fs::prelude::*;

    #[test]
    fn deserialize_full_config() {
        let yaml = r#"
parameters:
  horizon_periods: 24
  starting_population: 2000000
  base_price_per_unit: 9.5
  attrition_trend_bps_per_period: -20
price_adjustment_pct: 5
start_month: 2026-01
scenarios:
  - name: Base
  - name: Churn spike
    attrition_delta_pct: 2.5
"#;

        let config = deserialize_forecast_config_from_yaml_str(yaml).unwrap();

        assert_eq!(config.parameters.horizon_periods, Some(24));
        assert_eq!(config.parameters.starting_population, Some(2_000_000.0));
        assert_eq!(config.parameters.base_price_per_unit, Some(9.5));
        assert_eq!(config.parameters.price_growth_pct_per_period, None);
        assert_eq!(config.parameters.attrition_trend_bps_per_period, Some(-20.0));
        assert_eq!(config.price_adjustment_pct, Some(5.0));
        assert_eq!(config.start_month, Some(on_month(2026, 1)));
        assert_eq!(
            config.scenarios,
            Some(vec![
                Scenario::new("Base", 0.0),
                Scenario::new("Churn spike", 2.5)
            ])
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = deserialize_forecast_config_from_yaml_str("  \n").unwrap();
        assert_eq!(config, ForecastConfig::default());
    }

    #[test]
    fn overrides_only_replace_set_fields() {
        let overrides = ParameterOverrides {
            horizon_periods: Some(3),
            attrition_floor_pct: Some(0.0),
            ..ParameterOverrides::default()
        };
        let mut params = ScenarioParameters::default();

        overrides.apply_to(&mut params);

        assert_eq!(params.horizon_periods, 3);
        assert_eq!(params.attrition_floor_pct, 0.0);
        assert_eq!(params.base_price_per_unit, 8.0);
        assert_eq!(params.starting_population, 5_000_000.0);
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let yaml = "parameters:\n  churn: 5\n";
        let error = deserialize_forecast_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(error, ForecastConfigError::Parse(_)));
    }

    #[test]
    fn invalid_start_month_is_rejected() {
        let error = deserialize_forecast_config_from_yaml_str("start_month: January\n").unwrap_err();
        assert!(matches!(error, ForecastConfigError::InvalidStartMonth(value) if value == "January"));
    }

    #[test]
    fn blank_scenario_name_is_rejected() {
        let yaml = "scenarios:\n  - name: \"  \"\n";
        let error = deserialize_forecast_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(error, ForecastConfigError::InvalidScenario(_)));
    }

    #[test]
    fn parse_scenario_arg_splits_on_last_equals() {
        assert_eq!(
            parse_scenario_arg("Price war=1.5").unwrap(),
            Scenario::new("Price war", 1.5)
        );
        assert_eq!(
            parse_scenario_arg("a=b=-2").unwrap(),
            Scenario::new("a=b", -2.0)
        );
        assert!(parse_scenario_arg("Base").is_err());
        assert!(parse_scenario_arg("=1").is_err());
        assert!(parse_scenario_arg("Base=high").is_err());
    }

    #[test]
    fn load_forecast_config_reports_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let error = load_forecast_config_from_yaml_file(temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(error, ForecastConfigError::Read { .. }));
    }

    #[test]
    fn load_forecast_config_reads_file() {
        let file = assert_fs::NamedTempFile::new("forecast.yaml").unwrap();
        file.write_str("price_adjustment_pct: -3\n").unwrap();

        let config = load_forecast_config_from_yaml_file(file.path()).unwrap();
        assert_eq!(config.price_adjustment_pct, Some(-3.0));
    }
}
