use crate::services::forecast_summary::ForecastSummary;

pub fn format_forecast_summary(title: &str, summary: &ForecastSummary) -> String {
    let mut lines = Vec::new();
    lines.push(title.to_string());
    lines.push(format!(
        "Starting subscribers: {}",
        group_thousands(summary.starting_population)
    ));
    lines.push(format!(
        "Final subscribers after {} periods: {}",
        summary.horizon_periods,
        group_thousands(summary.final_population)
    ));
    lines.push(format!("Final price: {:.2}", summary.final_price_per_unit));
    lines.push(format!("Total revenue: {}", group_thousands(summary.total_revenue)));

    lines.join("\n")
}

pub fn format_comparison_summary(summaries: &[(&str, ForecastSummary)]) -> String {
    let mut lines = Vec::new();
    lines.push("Scenario Comparison".to_string());
    lines.push("Scenario | Final subscribers | Final price | Total revenue".to_string());
    lines.push("---------|-------------------|-------------|--------------".to_string());
    for (name, summary) in summaries {
        lines.push(format!(
            "{name} | {subscribers} | {price:.2} | {revenue}",
            subscribers = group_thousands(summary.final_population),
            price = summary.final_price_per_unit,
            revenue = group_thousands(summary.total_revenue),
        ));
    }
    lines.join("\n")
}

/// Formats a whole number with `,` thousands separators.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0.0 && digits != "0" {
        grouped.insert(0, '-');
    }
    grouped
}
