use std::collections::HashSet;

use log::{debug, warn};
use thiserror::Error;

use crate::domain::projection::{ScenarioComparison, ScenarioProjection, ScenarioRow};
use crate::domain::scenario::{Scenario, ScenarioParameters};
use crate::services::projection_engine::{project, ProjectionError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("at least one scenario is required")]
    NoScenarios,
    #[error("scenario {scenario}: {source}")]
    Scenario {
        scenario: String,
        source: ProjectionError,
    },
}

/// Parameters a scenario projects with: the price adjusted by the shared
/// percentage and the attrition rate shifted by the scenario delta.
pub fn effective_parameters(
    base: &ScenarioParameters,
    scenario: &Scenario,
    price_adjustment_pct: f64,
) -> ScenarioParameters {
    ScenarioParameters {
        base_price_per_unit: base.base_price_per_unit * (1.0 + price_adjustment_pct / 100.0),
        base_attrition_pct_per_period: base.base_attrition_pct_per_period
            + scenario.attrition_delta_pct,
        ..base.clone()
    }
}

/// Projects every scenario against the same base parameters.
///
/// Output follows scenario input order. Duplicate names are kept as separate
/// entries.
pub fn compare(
    base: &ScenarioParameters,
    scenarios: &[Scenario],
    price_adjustment_pct: f64,
) -> Result<ScenarioComparison, ComparisonError> {
    if scenarios.is_empty() {
        return Err(ComparisonError::NoScenarios);
    }
    warn_on_duplicate_names(scenarios);

    let mut comparison = ScenarioComparison::default();
    for scenario in scenarios {
        let params = effective_parameters(base, scenario, price_adjustment_pct);
        let rows = project(&params).map_err(|source| ComparisonError::Scenario {
            scenario: scenario.name.clone(),
            source,
        })?;
        debug!("scenario {} projected {} rows", scenario.name, rows.len());

        comparison
            .rows
            .extend(rows.iter().map(|row| ScenarioRow {
                scenario: scenario.name.clone(),
                row: *row,
            }));
        comparison.projections.push(ScenarioProjection {
            name: scenario.name.clone(),
            rows,
        });
    }
    Ok(comparison)
}

fn warn_on_duplicate_names(scenarios: &[Scenario]) {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.name.as_str()) {
            warn!("duplicate scenario name {}", scenario.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scenario::COMPARISON_ATTRITION_FLOOR_PCT;
    use crate::test_support::flat_parameters;
    use approx::assert_relative_eq;

    #[test]
    fn compare_preserves_scenario_order_and_row_counts() {
        let base = flat_parameters(6, 1000.0, 10.0, 5.0);
        let scenarios = vec![
            Scenario::new("Pessimistic", 2.0),
            Scenario::new("Base", 0.0),
            Scenario::new("Optimistic", -2.0),
        ];

        let comparison = compare(&base, &scenarios, 0.0).unwrap();

        assert_eq!(
            comparison.scenario_names(),
            vec!["Pessimistic", "Base", "Optimistic"]
        );
        assert!(comparison.projections.iter().all(|p| p.rows.len() == 6));
        assert_eq!(comparison.rows.len(), 18);
        assert_eq!(comparison.rows[0].scenario, "Pessimistic");
        assert_eq!(comparison.rows[6].scenario, "Base");
        assert_eq!(comparison.rows[17].scenario, "Optimistic");
        assert_eq!(comparison.rows[17].row.period, 6);
    }

    #[test]
    fn compare_applies_delta_and_price_adjustment() {
        let base = flat_parameters(2, 1000.0, 10.0, 5.0);
        let scenarios = vec![Scenario::new("Worse", 1.0)];

        let comparison = compare(&base, &scenarios, 10.0).unwrap();
        let rows = comparison.projection("Worse").unwrap();

        assert_relative_eq!(rows[0].price_per_unit, 11.0, max_relative = 1e-12);
        assert_eq!(rows[0].attrition_rate_pct, 6.0);
        assert_relative_eq!(rows[1].population, 940.0, max_relative = 1e-12);
    }

    #[test]
    fn scenario_results_match_direct_projection() {
        let base = flat_parameters(12, 5000.0, 8.0, 5.0);
        let scenario = Scenario::new("Base", 0.5);

        let comparison = compare(&base, &[scenario.clone()], -5.0).unwrap();
        let direct = project(&effective_parameters(&base, &scenario, -5.0)).unwrap();

        assert_eq!(comparison.projection("Base").unwrap(), direct.as_slice());
    }

    #[test]
    fn duplicate_names_produce_independent_entries() {
        let base = flat_parameters(3, 1000.0, 10.0, 5.0);
        let scenarios = vec![Scenario::new("Same", 0.0), Scenario::new("Same", 3.0)];

        let comparison = compare(&base, &scenarios, 0.0).unwrap();

        assert_eq!(comparison.projections.len(), 2);
        assert_eq!(comparison.rows.len(), 6);
        assert_eq!(comparison.projections[0].rows[0].attrition_rate_pct, 5.0);
        assert_eq!(comparison.projections[1].rows[0].attrition_rate_pct, 8.0);
    }

    #[test]
    fn negative_delta_is_clamped_by_floor() {
        let mut base = flat_parameters(3, 1000.0, 10.0, 1.0);
        base.attrition_floor_pct = COMPARISON_ATTRITION_FLOOR_PCT;

        let comparison = compare(&base, &[Scenario::new("Retention", -3.0)], 0.0).unwrap();
        let rows = comparison.projection("Retention").unwrap();

        assert!(rows.iter().all(|row| row.attrition_rate_pct == 0.0));
        assert!(rows.iter().all(|row| row.population == 1000.0));
    }

    #[test]
    fn compare_tags_errors_with_scenario_name() {
        let base = flat_parameters(3, 1000.0, 10.0, 5.0);
        let scenarios = vec![Scenario::new("Fine", 0.0), Scenario::new("Broken", 200.0)];

        let error = compare(&base, &scenarios, 0.0).unwrap_err();

        match error {
            ComparisonError::Scenario { scenario, source } => {
                assert_eq!(scenario, "Broken");
                assert!(matches!(
                    source,
                    ProjectionError::InvalidParameter {
                        name: "base_attrition_pct_per_period",
                        ..
                    }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn compare_rejects_price_adjustment_that_removes_the_price() {
        let base = flat_parameters(3, 1000.0, 10.0, 5.0);

        let error = compare(&base, &[Scenario::new("Free", 0.0)], -100.0).unwrap_err();

        assert!(matches!(error, ComparisonError::Scenario { .. }));
    }

    #[test]
    fn compare_requires_scenarios() {
        let base = flat_parameters(3, 1000.0, 10.0, 5.0);
        assert_eq!(compare(&base, &[], 0.0).unwrap_err(), ComparisonError::NoScenarios);
    }
}
