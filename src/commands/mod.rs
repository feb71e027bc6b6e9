pub mod base_commands;
pub mod compare_cmd;
pub mod completions_cmd;
pub mod forecast_inputs;
pub mod project_cmd;
pub mod report_format;
