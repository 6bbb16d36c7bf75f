use thiserror::Error;

/// Schema violation in one service definition. Fail-fast: the first
/// violation found in field-then-socket order is the only one reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid field: {0}")]
    InvalidField(&'static str),
}

/// Failure from the coordination store, excluding the exists-conflict:
/// that one is a regular outcome of `Store::create`, never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("connection to the store was lost")]
    ConnectionLoss,

    #[error("session error: {0}")]
    Session(String),

    #[error("parent node missing for {0}")]
    NoParent(String),

    #[error("node not found: {0}")]
    NoNode(String),

    #[error("permission denied on {0}")]
    PermissionDenied(String),

    #[error("operation on {path} timed out after {secs}s")]
    Timeout { path: String, secs: u64 },

    #[error("store error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("configuration error: {field}: {reason}")]
    ConfigError { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
