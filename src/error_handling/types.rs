//! Error type definitions.
//!
//! This module defines the error enums returned by library modules, plus the
//! `ErrorType` categories used to label a failed verdict with a cause kind.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Errors raised while locating, parsing or validating the configuration file.
///
/// Any of these aborts the run before a single check executes.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file at the resolved path.
    #[error("Config not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("Unsupported config extension: {0} (use .json, .yaml, or .yml)")]
    UnsupportedExtension(String),

    /// The file could not be read or written.
    #[error("Failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON syntax or schema error.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax or schema error.
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Semantic validation failure.
    #[error("{0}")]
    Invalid(String),
}

/// Errors from a single HTTP exchange driven by the redirect state machine.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read, ...).
    #[error("{0}")]
    Http(#[from] ReqwestError),

    /// The request URL or a `Location` header could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors that abort a check's evaluation before a verdict is assembled.
///
/// The executor converts these into a failed verdict; they never escape it.
#[derive(Error, Debug)]
pub enum CheckError {
    /// A probe request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The per-check HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] InitializationError),
}

/// Errors from the TLS certificate probe.
///
/// These never fail a verdict; the executor logs them and leaves the TLS
/// fields unset.
#[derive(Error, Debug)]
pub enum TlsProbeError {
    /// The URL has no host component, or the host is not a valid server name.
    #[error("Invalid TLS server name: {0}")]
    InvalidHost(String),

    /// TCP connect failed.
    #[error("Failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// The TLS handshake failed.
    #[error("TLS handshake failed for {host}: {source}")]
    Handshake {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// The whole probe exceeded its deadline.
    #[error("TLS probe timeout for {host} ({secs}s)")]
    Timeout { host: String, secs: u64 },

    /// The rustls client configuration could not be built.
    #[error("TLS configuration error: {0}")]
    Config(#[from] rustls::Error),

    /// The leaf certificate could not be parsed.
    #[error("Certificate parse error: {0}")]
    Parse(String),
}

/// Errors raised while building or delivering a notification.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMS gateway request failed at the transport level.
    #[error("SMS request error: {0}")]
    Http(#[from] ReqwestError),

    /// A configured SMS header name or value is not a valid HTTP header.
    #[error("Invalid SMS header '{0}'")]
    InvalidHeader(String),
}

/// Cause categories used to label a verdict whose evaluation failed outright.
///
/// The executor formats such failures as `"<cause kind>: <message>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestRequestError,
    HttpRequestOtherError,
    InvalidUrlError,
    ProbePanic,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "RequestBuilderError",
            ErrorType::HttpRequestRedirectError => "RedirectError",
            ErrorType::HttpRequestTimeoutError => "TimeoutError",
            ErrorType::HttpRequestConnectError => "ConnectError",
            ErrorType::HttpRequestBodyError => "BodyError",
            ErrorType::HttpRequestDecodeError => "DecodeError",
            ErrorType::HttpRequestRequestError => "RequestError",
            ErrorType::HttpRequestOtherError => "HttpError",
            ErrorType::InvalidUrlError => "InvalidUrlError",
            ErrorType::ProbePanic => "InternalError",
        }
    }
}
