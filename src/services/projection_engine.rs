use log::debug;
use thiserror::Error;

use crate::domain::projection::ProjectionRow;
use crate::domain::scenario::ScenarioParameters;

/// Upper bound on the attrition rate; a period cannot lose more than its whole population.
const MAX_ATTRITION_PCT: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ProjectionError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl ScenarioParameters {
    /// Checks the constraints every projection relies on.
    ///
    /// # Errors
    /// - `horizon_periods`, `starting_population` and `base_price_per_unit` must be
    ///   greater than zero; the horizon must fit an `i32` exponent.
    /// - Rates must be finite; the base attrition rate must be below 100 %.
    /// - The attrition floor must lie in `[0, 100)`.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.horizon_periods == 0 {
            return Err(ProjectionError::invalid(
                "horizon_periods",
                "must be greater than zero",
            ));
        }
        if i32::try_from(self.horizon_periods).is_err() {
            return Err(ProjectionError::invalid(
                "horizon_periods",
                format!("must not exceed {}, got {}", i32::MAX, self.horizon_periods),
            ));
        }
        if !(self.starting_population.is_finite() && self.starting_population > 0.0) {
            return Err(ProjectionError::invalid(
                "starting_population",
                format!("must be greater than zero, got {}", self.starting_population),
            ));
        }
        if !(self.base_price_per_unit.is_finite() && self.base_price_per_unit > 0.0) {
            return Err(ProjectionError::invalid(
                "base_price_per_unit",
                format!("must be greater than zero, got {}", self.base_price_per_unit),
            ));
        }
        if !self.price_growth_pct_per_period.is_finite() || self.price_growth_pct_per_period <= -100.0 {
            return Err(ProjectionError::invalid(
                "price_growth_pct_per_period",
                format!(
                    "must be a finite value above -100, got {}",
                    self.price_growth_pct_per_period
                ),
            ));
        }
        if !self.base_attrition_pct_per_period.is_finite()
            || self.base_attrition_pct_per_period >= MAX_ATTRITION_PCT
        {
            return Err(ProjectionError::invalid(
                "base_attrition_pct_per_period",
                format!(
                    "must be a finite value below 100, got {}",
                    self.base_attrition_pct_per_period
                ),
            ));
        }
        if !self.attrition_trend_bps_per_period.is_finite() {
            return Err(ProjectionError::invalid(
                "attrition_trend_bps_per_period",
                "must be finite",
            ));
        }
        if !(0.0..MAX_ATTRITION_PCT).contains(&self.attrition_floor_pct) {
            return Err(ProjectionError::invalid(
                "attrition_floor_pct",
                format!("must lie in [0, 100), got {}", self.attrition_floor_pct),
            ));
        }
        Ok(())
    }
}

/// Projects price, attrition, population and revenue for every period of the horizon.
///
/// Period `i` (0-based) uses:
/// - price: `base * (1 + growth/100)^i`
/// - attrition: `max(floor, base + i * trend_bps/100)`
/// - population: previous population retained at the previous period's attrition rate
/// - revenue: `population * price`
pub fn project(params: &ScenarioParameters) -> Result<Vec<ProjectionRow>, ProjectionError> {
    params.validate()?;
    debug!(
        "projecting {} periods from population {} at price {}",
        params.horizon_periods, params.starting_population, params.base_price_per_unit
    );

    let growth_factor = 1.0 + params.price_growth_pct_per_period / 100.0;
    let mut rows = Vec::with_capacity(params.horizon_periods);
    let mut population = params.starting_population;
    let mut previous_attrition: Option<f64> = None;

    for index in 0..params.horizon_periods {
        if let Some(attrition) = previous_attrition {
            population *= 1.0 - attrition / 100.0;
        }
        let exponent = i32::try_from(index).map_err(|_| {
            ProjectionError::invalid("horizon_periods", format!("period {index} is out of range"))
        })?;
        let price_per_unit = params.base_price_per_unit * growth_factor.powi(exponent);
        let attrition_rate_pct = attrition_rate_at(params, index);

        rows.push(ProjectionRow {
            period: index + 1,
            price_per_unit,
            attrition_rate_pct,
            population,
            revenue: population * price_per_unit,
        });
        previous_attrition = Some(attrition_rate_pct);
    }

    Ok(rows)
}

fn attrition_rate_at(params: &ScenarioParameters, index: usize) -> f64 {
    let trended = params.base_attrition_pct_per_period
        + index as f64 * (params.attrition_trend_bps_per_period / 100.0);
    trended.max(params.attrition_floor_pct).min(MAX_ATTRITION_PCT)
}
