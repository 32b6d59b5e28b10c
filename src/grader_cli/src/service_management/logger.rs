use std::{fs::File, io, path::PathBuf, sync::Arc};

use tracing::{level_filters::LevelFilter, subscriber, trace, Level};
use tracing_subscriber::{
    fmt::{
        format::{Compact, DefaultFields, Format, Json, JsonFields, Pretty},
        SubscriberBuilder,
    },
    EnvFilter, FmtSubscriber,
};

#[derive(Debug, PartialEq)]
pub enum Verbosity {
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Warn,
            1 => Verbosity::Info,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

impl From<Verbosity> for Level {
    fn from(v: Verbosity) -> Self {
        match v {
            Verbosity::Warn => Level::WARN,
            Verbosity::Info => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

pub enum LoggingMode {
    Full,
    Json,
    Compact,
}

fn standard_fmt(level: Level) -> SubscriberBuilder {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .with_file(true)
}

fn compact_fmt(level: Level) -> SubscriberBuilder<DefaultFields, Format<Compact>> {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_line_number(false)
        .with_file(false)
        .compact()
}

fn full_fmt(level: Level) -> SubscriberBuilder<Pretty, Format<Pretty>> {
    standard_fmt(level).pretty()
}

fn json_fmt(level: Level) -> SubscriberBuilder<JsonFields, Format<Json>> {
    standard_fmt(level).json().flatten_event(true)
}

/// Installs the global subscriber. Stdout carries the report, so logs go to
/// `log_file` when given and to stderr otherwise.
macro_rules! install {
    ($builder:expr, $log_file:expr) => {{
        let builder = $builder;
        match $log_file {
            Some(path) => match File::create(path) {
                Ok(file) => {
                    subscriber::set_global_default(builder.with_writer(Arc::new(file)).finish())
                }
                Err(err) => {
                    eprintln!("Failed to create log file {}: {err}", path.display());
                    subscriber::set_global_default(builder.with_writer(io::stderr).finish())
                }
            },
            None => subscriber::set_global_default(builder.with_writer(io::stderr).finish()),
        }
    }};
}

pub fn log(
    debug_level: Verbosity,
    mode: LoggingMode,
    log_file: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let level: Level = debug_level.into();
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env()?;

    let s = match mode {
        LoggingMode::Compact => install!(compact_fmt(level).with_env_filter(env_filter), log_file),
        LoggingMode::Json => install!(json_fmt(level).with_env_filter(env_filter), log_file),
        LoggingMode::Full => install!(full_fmt(level).with_env_filter(env_filter), log_file),
    };
    trace!(set_level = %level, "log level set");

    Ok(s?)
}
