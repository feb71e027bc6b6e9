use crate::domain::projection::ProjectionRow;
use crate::domain::scenario::ScenarioParameters;

// Constant price and attrition, no floor.
pub fn flat_parameters(
    horizon_periods: usize,
    starting_population: f64,
    base_price_per_unit: f64,
    base_attrition_pct_per_period: f64,
) -> ScenarioParameters {
    ScenarioParameters {
        horizon_periods,
        starting_population,
        base_price_per_unit,
        price_growth_pct_per_period: 0.0,
        base_attrition_pct_per_period,
        attrition_trend_bps_per_period: 0.0,
        attrition_floor_pct: 0.0,
    }
}

pub fn build_row(period: usize, price_per_unit: f64, attrition_rate_pct: f64, population: f64) -> ProjectionRow {
    ProjectionRow {
        period,
        price_per_unit,
        attrition_rate_pct,
        population,
        revenue: population * price_per_unit,
    }
}

pub fn on_month(year: i32, month: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}
