use std::{io, path::PathBuf};

use clap::{Parser, ValueEnum};
use html_checks::{
    assert_file_exists, CheckError, Checker, InputSource, CHECKSFILE_DEFAULT, HTMLFILE_DEFAULT,
};
use serde::Serialize;
use tracing::info;

pub mod service_management;

#[derive(Debug, Clone, Copy, ValueEnum, Default, Serialize)]
pub enum LogMode {
    Full,
    Json,
    #[default]
    Compact,
}

/// Grades an HTML document for the presence of the CSS selectors listed in a
/// JSON checks file.
#[derive(Debug, Serialize, Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URL address of html file.
    #[arg(short, long, value_name = "LINK_ADDRESS", env = "GRADER_URL")]
    pub url: Option<String>,

    /// Path to html file. Defaults to index.html
    #[arg(short, long, value_name = "HTML_FILE", env = "GRADER_HTML_FILE")]
    pub file: Option<PathBuf>,

    /// Path to JSON rules file. Defaults to checks.json
    #[arg(short, long, value_name = "CHECK_FILE", env = "GRADER_CHECKS_FILE")]
    pub checks: Option<PathBuf>,

    /// Turn debugging information on (repeat for higher levels)
    #[arg(short, long, action = clap::ArgAction::Count, env = "GRADER_DEBUG")]
    pub debug: u8,

    /// Output logs in json format.
    #[clap(long, value_enum)]
    pub log_mode: Option<LogMode>,

    /// File for logs to be written to
    #[arg(long, value_parser)]
    pub log_file: Option<PathBuf>,

    /// Generate a Markdown file of all CLI commands and options
    #[arg(long)]
    pub help_markdown: bool,
}

impl Cli {
    /// A URL wins over a file path when both are given.
    pub fn source(&self) -> InputSource {
        match &self.url {
            Some(url) => InputSource::Url(url.clone()),
            None => InputSource::File(
                self.file
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(HTMLFILE_DEFAULT)),
            ),
        }
    }

    pub fn checks_file(&self) -> PathBuf {
        self.checks
            .clone()
            .unwrap_or_else(|| PathBuf::from(CHECKSFILE_DEFAULT))
    }

    /// Explicitly supplied paths must exist up front, whichever mode runs.
    /// Defaults are only checked when they are read.
    pub fn validate(&self) -> Result<(), CheckError> {
        for path in [&self.file, &self.checks].into_iter().flatten() {
            assert_file_exists(path)?;
        }
        Ok(())
    }
}

pub async fn execute(cli: &Cli) -> anyhow::Result<()> {
    if cli.help_markdown {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    cli.validate()?;
    let source = cli.source();
    let checker: Checker = Checker::default();
    let results = checker
        .run(&source, &cli.checks_file(), &mut io::stdout())
        .await?;
    info!(?source, checks = results.len(), "report written");
    Ok(())
}

/// Prints `err` where the caller expects it and returns the exit code.
/// Missing files and fetch failures go to stdout with exit code 1; anything
/// else goes to stderr.
pub fn report_failure(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CheckError>() {
        Some(check_err) if check_err.reports_on_stdout() => {
            println!("{check_err}");
            check_err.exit_code()
        }
        Some(check_err) => {
            eprintln!("{check_err}");
            check_err.exit_code()
        }
        None => {
            eprintln!("Error: {err:#}");
            2
        }
    }
}
