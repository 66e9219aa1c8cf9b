use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, SubmissionId};

/// An accepted product submission.
///
/// Created only by the submission store, which assigns `id` and
/// `submitted_at` exactly once. Records are never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub product_name: NonEmptyString,
    pub product_type: NonEmptyString,
    pub description: String,
    /// Answers keyed by question id. Keys are a subset of the question ids
    /// shown for `product_type` when the questionnaire was generated; the
    /// store does not re-validate this.
    pub answers: BTreeMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}

/// Completed draft handed to the store by the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub product_name: NonEmptyString,
    pub product_type: NonEmptyString,
    pub description: String,
    pub answers: BTreeMap<String, String>,
}
