use crate::domain::projection::ProjectionRow;

/// Headline figures of one projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub horizon_periods: usize,
    pub starting_population: f64,
    pub final_population: f64,
    pub final_price_per_unit: f64,
    /// Sum of the rounded per-period revenue.
    pub total_revenue: f64,
}

impl ForecastSummary {
    pub fn from_rows(rows: &[ProjectionRow]) -> Option<Self> {
        let first = rows.first()?.presented();
        let last = rows.last()?.presented();
        Some(Self {
            horizon_periods: rows.len(),
            starting_population: first.population,
            final_population: last.population,
            final_price_per_unit: last.price_per_unit,
            total_revenue: rows.iter().map(|row| row.presented().revenue).sum(),
        })
    }
}
