use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::domain::projection::{PresentedRow, ProjectionRow, ScenarioComparison};
use crate::services::forecast_table::{ForecastTable, PeriodLabels};
use crate::services::html_export::{write_html_table, HtmlExportError};
use crate::services::spreadsheet_export::{write_spreadsheet, SpreadsheetExportError};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot infer export format from {0}; use --format")]
    UnknownFormat(String),
    #[error("failed to write export file: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to serialize yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetExportError),
    #[error(transparent)]
    Html(#[from] HtmlExportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Html,
    Yaml,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &str) -> Result<Self, ExportError> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| ExportError::UnknownFormat(path.to_string()))
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "html" | "htm" => Ok(ExportFormat::Html),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Html => "html",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// What gets exported: one projection or a scenario comparison.
#[derive(Debug, Clone, Copy)]
pub enum ForecastData<'a> {
    Projection(&'a [ProjectionRow]),
    Comparison(&'a ScenarioComparison),
}

impl ForecastData<'_> {
    pub fn table(&self, labels: PeriodLabels) -> ForecastTable {
        match self {
            ForecastData::Projection(rows) => ForecastTable::from_projection(rows, labels),
            ForecastData::Comparison(comparison) => {
                ForecastTable::from_comparison(comparison, labels)
            }
        }
    }

    fn sheet_name(&self) -> &'static str {
        match self {
            ForecastData::Projection(_) => "Forecast",
            ForecastData::Comparison(_) => "Scenarios",
        }
    }

    fn records(&self, labels: PeriodLabels) -> Vec<RowRecord<'_>> {
        match self {
            ForecastData::Projection(rows) => rows
                .iter()
                .map(|row| RowRecord::new(None, row, labels))
                .collect(),
            ForecastData::Comparison(comparison) => comparison
                .rows
                .iter()
                .map(|tagged| RowRecord::new(Some(tagged.scenario.as_str()), &tagged.row, labels))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct RowRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<String>,
    #[serde(flatten)]
    values: PresentedRow,
}

impl<'a> RowRecord<'a> {
    fn new(scenario: Option<&'a str>, row: &ProjectionRow, labels: PeriodLabels) -> Self {
        Self {
            scenario,
            month: labels.month_label(row.period),
            values: row.presented(),
        }
    }
}

/// Writes the forecast to `output_path` in the given format.
pub fn export_forecast(
    output_path: &str,
    format: ExportFormat,
    data: ForecastData<'_>,
    labels: PeriodLabels,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Xlsx => {
            write_spreadsheet(output_path, data.sheet_name(), &data.table(labels))?;
        }
        ExportFormat::Html => {
            let mut file = std::fs::File::create(output_path)?;
            write_html_table(&mut file, &data.table(labels))?;
        }
        ExportFormat::Yaml => {
            std::fs::write(output_path, serde_yaml::to_string(&data.records(labels))?)?;
        }
        ExportFormat::Json => {
            std::fs::write(output_path, serde_json::to_string_pretty(&data.records(labels))?)?;
        }
    }
    Ok(())
}
