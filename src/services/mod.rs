pub mod forecast_config;
pub mod forecast_export;
pub mod forecast_plot;
pub mod forecast_summary;
pub mod forecast_table;
pub mod html_export;
pub mod projection_engine;
pub mod scenario_comparison;
pub mod spreadsheet_export;
