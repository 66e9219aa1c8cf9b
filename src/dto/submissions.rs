//! JSON response envelopes.
//!
//! Every response carries a `success` flag; failures additionally carry a
//! human-readable `message`. Field names follow the camelCase wire format.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::submission::Submission;
use crate::services::questions::QuestionSet;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Body of `GET /api/products`.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub data: Vec<Submission>,
    pub count: usize,
}

impl ProductListResponse {
    pub fn new(data: Vec<Submission>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Body of a successful `POST /api/products`.
#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: Submission,
}

impl ProductCreatedResponse {
    pub fn new(data: Submission) -> Self {
        Self {
            success: true,
            message: "Product submitted successfully",
            data,
        }
    }
}

/// Body of a successful `POST /api/generate-questions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestionsResponse {
    pub success: bool,
    /// The resolved category, which the client should display in place of
    /// whatever label it sent.
    pub product_type: String,
    pub questions: QuestionSet,
}

impl GeneratedQuestionsResponse {
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            success: true,
            product_type: questions.metadata.product_type.clone(),
            questions,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new() -> Self {
        Self {
            success: true,
            message: "Server is running",
            timestamp: Utc::now(),
        }
    }
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self::new()
    }
}
