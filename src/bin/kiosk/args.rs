//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KIOSK_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "KIOSK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Terminal storefront
#[derive(Debug, Parser)]
#[command(name = "kiosk", about = "Terminal storefront with an order assistant", long_about = None)]
pub struct Cli {
    /// Storefront config file (YAML)
    #[arg(short, long, env = "KIOSK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Menu file (YAML); the bundled menu is used when omitted
    #[arg(long, env = "KIOSK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingArgs,
}
