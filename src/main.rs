use routeforge::cli::run_cli;
use routeforge::logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    init_logging(&LogConfig::from_env())?;
    run_cli()
}
