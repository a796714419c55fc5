// src/error.rs
//! Engine error types with structured error handling.
//!
//! The error enum is the vocabulary for failure modes in the system. Only
//! three tolerances are handled silently elsewhere (numeric coercion,
//! stale option references, schema loss for a bound task); everything that
//! reaches this module propagates to the caller.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system. Each variant
/// tells you exactly what the Notion API reported and enables
/// pattern-based handling without stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded — back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API token is invalid or expired
    Unauthorized,
    /// API token lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    ///
    /// The engine itself never retries; this is a hint for the scheduling
    /// collaborator that owns retry/backoff policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }

    /// Whether this error means the stored credential was rejected.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::RestrictedResource)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main engine error type.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Recurring task {task_id} no longer exists")]
    TaskNotFound { task_id: String },

    #[error("Owner {owner} has no workspace access grant")]
    AccessGrantMissing { owner: String },

    #[error("A non-empty database id is required")]
    EmptyDatabaseId,

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Malformed schema payload: {0}")]
    MalformedSchema(String),

    #[error("Task storage failure: {0}")]
    Storage(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl EngineError {
    /// Whether a schema fetch failing with this error should unbind the
    /// task's database instead of failing the run.
    ///
    /// Covers a revoked/expired token and a database deleted upstream.
    /// A task whose credential or database is gone would otherwise error
    /// on every scheduled fire.
    pub fn degrades_to_unbound(&self) -> bool {
        match self {
            Self::NotionService { code, .. } => {
                code.is_not_found() || code.is_credential_rejection()
            }
            _ => false,
        }
    }
}

// Structural decode failures are malformed payloads, not transport errors.
impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::MalformedSchema(err.to_string())
    }
}

// Allow converting from anyhow::Error, flattening the chain into a message.
impl From<anyhow::Error> for EngineError {
    fn from(err: anyhow::Error) -> Self {
        EngineError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
