use thiserror::Error;

use crate::domain::submission::{NewSubmission, Submission};
use crate::domain::types::SubmissionId;

pub mod submission;

pub use submission::InMemoryRepository;

/// Errors surfaced by submission store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store's internal lock was poisoned by a panicking writer.
    #[error("submission store is unavailable")]
    Poisoned,
    /// Catch-all for store-specific failures.
    #[error("storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read-only operations for accepted submissions.
pub trait SubmissionReader {
    /// Return all submissions in insertion order, never reordered or
    /// filtered.
    fn list_submissions(&self) -> RepositoryResult<Vec<Submission>>;
    /// Retrieve a submission by its identifier.
    fn get_submission_by_id(&self, id: SubmissionId) -> RepositoryResult<Option<Submission>>;
}

/// Write operations for accepted submissions.
pub trait SubmissionWriter {
    /// Assign the next id and the acceptance timestamp, append the record
    /// and return it. Id assignment and append are atomic with respect to
    /// each other.
    fn accept_submission(&self, draft: &NewSubmission) -> RepositoryResult<Submission>;
}
