//! Error types for idorg-bar.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose
//! via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from application start-up and the event loop
//!   - [`crate::config::ConfigError`] - Config file read/parse failures
//!   - [`crate::logging::LoggingError`] - Tracing subscriber set-up failures
//!   - [`ClientError`] - HTTP client construction failures
//!   - `std::io::Error` - Terminal/TUI failures
//!
//! # Error Recovery Strategy
//!
//! Query problems are not errors at all: an empty, multi-token, unknown or
//! incomplete query is a [`crate::model::ValidityState`]. Search failures
//! ([`SearchError`]) are recovered at the client boundary as an empty
//! candidate list. Resolution failures become
//! [`crate::resolver::Resolution::Failed`] values. Only start-up and terminal
//! failures are fatal.

use thiserror::Error;

/// Top-level application error.
///
/// All fatal failure modes convert into `AppError` via `From`, so `main` and
/// the view layer can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but cannot be used.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// An HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the bar cannot function. The caller
    /// restores the terminal before reporting this on stderr.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure to construct one of the HTTP clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A configured base URL does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use idorg_bar::model::ClientError;
    ///
    /// let err = ClientError::InvalidUrl {
    ///     url: "not a url".to_string(),
    ///     reason: "relative URL without a base".to_string(),
    /// };
    /// assert!(err.to_string().contains("not a url"));
    /// ```
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// reqwest refused to build the client (TLS backend initialisation).
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Failure while querying the namespace search service.
///
/// Never escapes [`crate::search::NamespaceSearch::fetch`]: the search
/// client logs it and reports zero candidates instead.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure, timeout, or undecodable body.
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    ///
    /// # Examples
    ///
    /// ```
    /// use idorg_bar::model::SearchError;
    ///
    /// let err = SearchError::Status(503);
    /// assert!(err.to_string().contains("503"));
    /// ```
    #[error("Search service returned HTTP {0}")]
    Status(u16),
}
