//! Core error types for questline-core.
//!
//! This module defines the error hierarchy using thiserror. Every fallible
//! operation in the library returns one of these types instead of collapsing
//! failures into sentinel values (empty lists, booleans).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for questline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Decomposition/advice gateway errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Snapshot/config storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Rejected state mutations
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the external decomposition/advice service boundary.
///
/// The caller commits no state on any of these; they all mean "no drafts".
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No API key stored in the keyring or environment
    #[error("No API key configured for the decomposition service")]
    MissingApiKey,

    /// Configured endpoint is not a valid URL
    #[error("Invalid service endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Transport-level failure (DNS, TLS, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from the service
    #[error("Service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Request quota exhausted (HTTP 429)
    #[error("Service quota exceeded")]
    QuotaExceeded,

    /// Response body did not match the draft contract
    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    /// Service answered with no candidate content
    #[error("Service returned an empty response")]
    EmptyResponse,

    /// A fresh decomposition must yield 3-6 drafts
    #[error("Draft count {count} outside the supported range")]
    DraftCountOutOfRange { count: usize },
}

/// Snapshot and configuration storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Data directory could not be determined or created
    #[error("Failed to prepare data directory at {path}: {message}")]
    DataDir { path: PathBuf, message: String },

    /// Failed to read a stored document
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a stored document
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot exists but is not valid JSON for the current schema
    #[error("Corrupt snapshot at {path}: {message}")]
    CorruptSnapshot { path: PathBuf, message: String },

    /// Imported document failed validation before replacing state
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    /// Failed to parse the TOML config
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

/// Rejected mutations. State is left unchanged when these are returned.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Macro-task goals must be non-empty
    #[error("Goal title must not be empty")]
    EmptyGoal,

    /// Referenced task does not exist
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// Referenced daily quest does not exist
    #[error("Unknown daily quest: {0}")]
    UnknownQuest(String),

    /// Referenced friend does not exist
    #[error("Unknown friend: {0}")]
    UnknownFriend(String),

    /// Completion requested with no active quest
    #[error("No active quest")]
    NoActiveQuest,

    /// Task is already in a terminal state
    #[error("Task already completed: {0}")]
    AlreadyDone(String),

    /// Purchase rejected; XP balance and inventory are untouched
    #[error("Insufficient XP: cost {cost}, balance {balance}")]
    InsufficientXp { cost: u64, balance: u64 },

    /// Each friend can be cheered at most once per day
    #[error("Already cheered {0} today")]
    AlreadyCheered(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
