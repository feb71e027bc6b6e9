use chrono::{Months, NaiveDate};

use crate::domain::projection::{PresentedRow, ProjectionRow, ScenarioComparison};

pub const PERIOD_HEADER: &str = "Period";
pub const SCENARIO_HEADER: &str = "Scenario";
pub const VALUE_HEADERS: [&str; 4] = [
    "Price per Subscriber",
    "Attrition Rate (%)",
    "Subscribers",
    "Revenue",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(usize),
    Number { value: f64, decimals: usize },
}

impl Cell {
    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Integer(value) => value.to_string(),
            Cell::Number { value, decimals } => format!("{value:.decimals$}"),
        }
    }
}

/// How the period column is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodLabels {
    #[default]
    Index,
    /// Calendar months, period 1 being the given month.
    Months(NaiveDate),
}

impl PeriodLabels {
    pub fn from_start_month(start_month: Option<NaiveDate>) -> Self {
        start_month.map_or(PeriodLabels::Index, PeriodLabels::Months)
    }

    pub fn cell(&self, period: usize) -> Cell {
        match self.month_label(period) {
            Some(label) => Cell::Text(label),
            None => Cell::Integer(period),
        }
    }

    /// Whether every period up to `horizon_periods` has a label.
    pub fn covers(&self, horizon_periods: usize) -> bool {
        match self {
            PeriodLabels::Index => true,
            PeriodLabels::Months(_) => self.month_label(horizon_periods.max(1)).is_some(),
        }
    }

    /// `YYYY-MM` of the period, when labelling by calendar month.
    pub fn month_label(&self, period: usize) -> Option<String> {
        let PeriodLabels::Months(start) = self else {
            return None;
        };
        let offset = u32::try_from(period.saturating_sub(1)).ok()?;
        start
            .checked_add_months(Months::new(offset))
            .map(|month| month.format("%Y-%m").to_string())
    }
}

/// Headers plus rows of rounded values, ready for display or export.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ForecastTable {
    pub fn from_projection(rows: &[ProjectionRow], labels: PeriodLabels) -> Self {
        let mut headers = vec![PERIOD_HEADER.to_string()];
        headers.extend(VALUE_HEADERS.iter().map(|header| header.to_string()));

        let rows = rows
            .iter()
            .map(|row| {
                let mut cells = vec![labels.cell(row.period)];
                cells.extend(value_cells(&row.presented()));
                cells
            })
            .collect();

        Self { headers, rows }
    }

    pub fn from_comparison(comparison: &ScenarioComparison, labels: PeriodLabels) -> Self {
        let mut headers = vec![SCENARIO_HEADER.to_string(), PERIOD_HEADER.to_string()];
        headers.extend(VALUE_HEADERS.iter().map(|header| header.to_string()));

        let rows = comparison
            .rows
            .iter()
            .map(|tagged| {
                let mut cells = vec![
                    Cell::Text(tagged.scenario.clone()),
                    labels.cell(tagged.row.period),
                ];
                cells.extend(value_cells(&tagged.row.presented()));
                cells
            })
            .collect();

        Self { headers, rows }
    }
}

fn value_cells(row: &PresentedRow) -> [Cell; 4] {
    [
        Cell::Number {
            value: row.price_per_unit,
            decimals: 2,
        },
        Cell::Number {
            value: row.attrition_rate_pct,
            decimals: 2,
        },
        Cell::Number {
            value: row.population,
            decimals: 0,
        },
        Cell::Number {
            value: row.revenue,
            decimals: 0,
        },
    ]
}
