use std::process::ExitCode;

use clap::Parser;
use subscriber_forecasts::commands::base_commands::{CliArgs, Commands};
use subscriber_forecasts::commands::compare_cmd::compare_command;
use subscriber_forecasts::commands::completions_cmd::completions_command;
use subscriber_forecasts::commands::project_cmd::project_command;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Project { .. } => project_command(cmd),
        cmd @ Commands::Compare { .. } => compare_command(cmd),
        cmd @ Commands::Completions { .. } => completions_command(cmd),
    }
}
