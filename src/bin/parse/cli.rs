//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for
//! the `parse` binary.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for the parser binary.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Files or directories to parse. Directories are walked recursively for
    /// `.java` files.
    #[arg(required = true)]
    pub paths: Vec<std::path::PathBuf>,

    /// Dump the parsed tree for every file that parses successfully.
    #[arg(long)]
    pub walk: bool,

    /// Enable trace logging of grammar entry/exit.
    #[arg(long)]
    pub debug: bool,

    /// Specify the log level of the parser.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of the CLI.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only failures are logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log warnings.
    #[value(alias("1"))]
    Warn,

    /// Also log which files are being parsed and `--walk` output.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the parser.
    #[value(alias("3"))]
    Debug,

    /// Log grammar entry/exit tracing. Implied by `--debug`.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
