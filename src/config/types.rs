//! Configuration types.
//!
//! This module defines the enums and structs used for command-line argument
//! parsing and library configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How a transport failure on a hop is escalated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackMode {
    /// Issue one auto-following request to recover the resolved destination.
    Follow,
    /// Never attempt recovery. Used where every hop is already observable.
    Disabled,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use link_chain::Config;
///
/// let config = Config {
///     timeout_seconds: 5,
///     overall_timeout_seconds: Some(30),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds (applies to every hop, the fallback and the preview)
    pub timeout_seconds: u64,

    /// Wall-clock budget for one whole trace (traversal and preview), in seconds
    pub overall_timeout_seconds: Option<u64>,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Recovery strategy after a transport failure
    pub fallback: FallbackMode,

    /// Fetch link-preview metadata for the final URL
    pub preview: bool,
}

impl Config {
    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Overall trace budget as a `Duration`, if one is set.
    pub fn overall_timeout(&self) -> Option<Duration> {
        self.overall_timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            overall_timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fallback: FallbackMode::Follow,
            preview: true,
        }
    }
}

/// Command-line options.
///
/// Every flag maps one-to-one onto a [`Config`] field, except the URLs to
/// trace and the output style, which only concern the binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "link_chain",
    version,
    about = "Trace the redirect chain of one or more links and preview where they land"
)]
pub struct Opt {
    /// URLs to trace (https:// is assumed when no scheme is given)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info", env = "LINK_CHAIN_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", env = "LINK_CHAIN_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "LINK_CHAIN_TIMEOUT_SECONDS")]
    pub timeout_seconds: u64,

    /// Wall-clock budget for one trace (traversal and preview) in seconds
    #[arg(long, env = "LINK_CHAIN_OVERALL_TIMEOUT_SECONDS")]
    pub overall_timeout_seconds: Option<u64>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, env = "LINK_CHAIN_USER_AGENT")]
    pub user_agent: String,

    /// Do not attempt recovery after a transport failure
    #[arg(long)]
    pub no_fallback: bool,

    /// Do not fetch link-preview metadata for the final URL
    #[arg(long)]
    pub no_preview: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
            timeout_seconds: opt.timeout_seconds,
            overall_timeout_seconds: opt.overall_timeout_seconds,
            user_agent: opt.user_agent.clone(),
            fallback: if opt.no_fallback {
                FallbackMode::Disabled
            } else {
                FallbackMode::Follow
            },
            preview: !opt.no_preview,
        }
    }
}
