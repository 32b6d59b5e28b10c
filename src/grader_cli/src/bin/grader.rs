use std::process::ExitCode;

use clap::Parser;
use grader::{service_management, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = service_management::start(&cli) {
        eprintln!("Failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match grader::execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(grader::report_failure(&err)),
    }
}
