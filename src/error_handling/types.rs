//! Error type definitions.
//!
//! This module defines the typed errors used at collaborator boundaries and the
//! taxonomy of conditions that end a redirect chain.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::{CANCELLED_MESSAGE, LOOP_DETECTED_MESSAGE, MAX_REDIRECTS_MESSAGE};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of a single hop request.
///
/// The `Display` output is the collaborator's own message, unmodified, because
/// it is written verbatim into `Hop.error`.
#[derive(Error, Debug)]
pub enum HopFetchError {
    /// The underlying HTTP transport rejected the request (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Transport(#[from] ReqwestError),

    /// Any other collaborator failure carrying only a message.
    #[error("{0}")]
    Other(String),
}

/// Conditions that end a redirect chain.
///
/// Every traversal ends in exactly one of these. Only some of them are written
/// into the final hop as an error string; see [`ChainTermination::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ChainTermination {
    /// A non-redirect response ended the chain.
    Completed,
    /// A 3xx response had no usable `Location` header. Quiet: no error string.
    MalformedRedirect,
    /// The same exact URL was visited twice.
    LoopDetected,
    /// The hop ceiling was reached without a terminal response.
    MaxRedirectsExceeded,
    /// The hop request failed at the transport level.
    TransportError,
    /// The traversal was cancelled by the caller or its overall budget.
    Cancelled,
}

impl std::fmt::Display for ChainTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ChainTermination {
    /// Returns a human-readable string representation of the termination.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainTermination::Completed => "Completed",
            ChainTermination::MalformedRedirect => "Redirect without Location header",
            ChainTermination::LoopDetected => "Redirect loop",
            ChainTermination::MaxRedirectsExceeded => "Too many redirects",
            ChainTermination::TransportError => "Transport error",
            ChainTermination::Cancelled => "Cancelled",
        }
    }

    /// The canonical `Hop.error` text written for this termination, if it has one.
    ///
    /// Transport errors carry the collaborator's message instead, and the
    /// quiet terminations carry nothing.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ChainTermination::LoopDetected => Some(LOOP_DETECTED_MESSAGE),
            ChainTermination::MaxRedirectsExceeded => Some(MAX_REDIRECTS_MESSAGE),
            ChainTermination::Cancelled => Some(CANCELLED_MESSAGE),
            ChainTermination::Completed
            | ChainTermination::MalformedRedirect
            | ChainTermination::TransportError => None,
        }
    }

    /// Whether this termination means the chain did not reach a destination normally.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            ChainTermination::Completed | ChainTermination::MalformedRedirect
        )
    }
}
