/// Minimum attrition rate used by a single-scenario forecast.
pub const SINGLE_SCENARIO_ATTRITION_FLOOR_PCT: f64 = 0.1;
/// Minimum attrition rate used when comparing scenarios.
pub const COMPARISON_ATTRITION_FLOOR_PCT: f64 = 0.0;

/// Inputs of one projection run.
///
/// Rates are percentages (`5.0` means 5 %). The attrition trend is expressed in
/// basis points per period, so `-10` lowers attrition by 0.1 percentage points
/// each period.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParameters {
    pub horizon_periods: usize,
    pub starting_population: f64,
    pub base_price_per_unit: f64,
    pub price_growth_pct_per_period: f64,
    pub base_attrition_pct_per_period: f64,
    pub attrition_trend_bps_per_period: f64,
    pub attrition_floor_pct: f64,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            horizon_periods: 12,
            starting_population: 5_000_000.0,
            base_price_per_unit: 8.0,
            price_growth_pct_per_period: 2.0,
            base_attrition_pct_per_period: 5.0,
            attrition_trend_bps_per_period: -10.0,
            attrition_floor_pct: SINGLE_SCENARIO_ATTRITION_FLOOR_PCT,
        }
    }
}

/// A named variant of the base parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    /// Added to the base attrition rate, in percentage points.
    pub attrition_delta_pct: f64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, attrition_delta_pct: f64) -> Self {
        Self {
            name: name.into(),
            attrition_delta_pct,
        }
    }

    pub fn default_set() -> Vec<Scenario> {
        vec![
            Scenario::new("Base", 0.0),
            Scenario::new("Optimistic", -1.0),
            Scenario::new("Pessimistic", 1.0),
        ]
    }
}
