use thiserror::Error;

/// Generic error type used by service layer functions.
///
/// Three coarse categories suffice for the caller: validation failures at a
/// stage guard, upstream store/resolve failures, and report generation
/// failures. All are terminal for the attempt and none crash the session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// A required field was missing or invalid at a transition guard.
    #[error("{0}")]
    Validation(String),
    /// An external call (store accept/list) failed.
    #[error("{0}")]
    Upstream(String),
    /// Document generation failed.
    #[error("{0}")]
    Render(String),
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
