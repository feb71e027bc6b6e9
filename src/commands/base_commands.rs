use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::scenario::Scenario;
use crate::services::forecast_config::{parse_scenario_arg, ParameterOverrides};
use crate::services::forecast_export::ExportFormat;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast price, attrition, subscribers and revenue for one scenario
    Project {
        #[command(flatten)]
        forecast: ForecastArgs,
    },
    /// Forecast several scenarios side by side
    Compare {
        #[command(flatten)]
        forecast: ForecastArgs,
        /// Scenario as NAME=ATTRITION_DELTA (repeatable)
        #[arg(long = "scenario", value_parser = parse_scenario)]
        scenarios: Vec<Scenario>,
        /// Price adjustment applied to every scenario (%)
        #[arg(long, allow_negative_numbers = true)]
        price_adjustment: Option<f64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// Optional forecast config YAML
    #[arg(short, long)]
    pub config: Option<String>,
    /// Output file (.xlsx, .html, .yaml or .json)
    #[arg(short, long)]
    pub output: String,
    /// Export format; inferred from the output extension when omitted
    #[arg(short, long)]
    pub format: Option<ExportFormat>,
    /// Also render the forecast charts to this PNG file
    #[arg(short, long)]
    pub plot: Option<String>,
    /// Label periods with calendar months starting here (YYYY-MM)
    #[arg(short, long)]
    pub start_month: Option<String>,
    /// Number of periods to project
    #[arg(short = 'n', long)]
    pub periods: Option<usize>,
    /// Starting subscriber count
    #[arg(long)]
    pub subscribers: Option<f64>,
    /// Base price per subscriber
    #[arg(long)]
    pub price: Option<f64>,
    /// Price growth per period (%)
    #[arg(long, allow_negative_numbers = true)]
    pub price_growth: Option<f64>,
    /// Base attrition rate per period (%)
    #[arg(long, allow_negative_numbers = true)]
    pub attrition: Option<f64>,
    /// Attrition change per period (basis points)
    #[arg(long, allow_negative_numbers = true)]
    pub attrition_trend: Option<f64>,
    /// Minimum attrition rate (%)
    #[arg(long)]
    pub attrition_floor: Option<f64>,
}

impl ForecastArgs {
    pub fn parameter_overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            horizon_periods: self.periods,
            starting_population: self.subscribers,
            base_price_per_unit: self.price,
            price_growth_pct_per_period: self.price_growth,
            base_attrition_pct_per_period: self.attrition,
            attrition_trend_bps_per_period: self.attrition_trend,
            attrition_floor_pct: self.attrition_floor,
        }
    }
}

fn parse_scenario(value: &str) -> Result<Scenario, String> {
    parse_scenario_arg(value).map_err(|e| e.to_string())
}
