use serde::Serialize;

/// One projected period. Values are unrounded; see [`PresentedRow`] for the
/// rounded form used in tables and exports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRow {
    /// 1-based period index.
    pub period: usize,
    pub price_per_unit: f64,
    pub attrition_rate_pct: f64,
    pub population: f64,
    pub revenue: f64,
}

impl ProjectionRow {
    pub fn presented(&self) -> PresentedRow {
        PresentedRow {
            period: self.period,
            price_per_unit: round_to(self.price_per_unit, 2),
            attrition_rate_pct: round_to(self.attrition_rate_pct, 2),
            population: round_to(self.population, 0),
            revenue: round_to(self.revenue, 0),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PresentedRow {
    pub period: usize,
    pub price_per_unit: f64,
    pub attrition_rate_pct: f64,
    pub population: f64,
    pub revenue: f64,
}

/// Projection of a single scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioProjection {
    pub name: String,
    pub rows: Vec<ProjectionRow>,
}

/// A projection row tagged with the scenario that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRow {
    pub scenario: String,
    pub row: ProjectionRow,
}

/// Result of comparing scenarios, in scenario input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioComparison {
    pub projections: Vec<ScenarioProjection>,
    pub rows: Vec<ScenarioRow>,
}

impl ScenarioComparison {
    /// Rows of the first scenario with the given name.
    pub fn projection(&self, name: &str) -> Option<&[ProjectionRow]> {
        self.projections
            .iter()
            .find(|projection| projection.name == name)
            .map(|projection| projection.rows.as_slice())
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.projections
            .iter()
            .map(|projection| projection.name.as_str())
            .collect()
    }
}

/// Rounds half to even, matching the usual dataframe rounding.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
