use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::submission::NewSubmission;
use crate::domain::types::{NonEmptyString, TypeConstraintError};

/// Request body for `POST /api/products`.
///
/// Only the name and the type are required at the transport boundary; the
/// description and the answer map may be absent (the workflow applies its
/// own, stricter stage guards before ever building this request).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProductForm {
    #[validate(length(min = 1))]
    pub product_name: String,
    #[validate(length(min = 1))]
    pub product_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitProductFormPayload {
    pub product_name: NonEmptyString,
    pub product_type: NonEmptyString,
    pub description: String,
    pub answers: BTreeMap<String, String>,
}

impl SubmitProductFormPayload {
    pub fn into_new_submission(self) -> NewSubmission {
        NewSubmission {
            product_name: self.product_name,
            product_type: self.product_type,
            description: self.description,
            answers: self.answers,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitProductFormError {
    #[error("{0}")]
    Validation(String),
    #[error("Submit product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SubmitProductFormError {
    fn from(_: ValidationErrors) -> Self {
        Self::Validation("Product name and type are required".to_string())
    }
}

impl From<TypeConstraintError> for SubmitProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SubmitProductForm> for SubmitProductFormPayload {
    type Error = SubmitProductFormError;

    fn try_from(value: SubmitProductForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            product_name: NonEmptyString::new_for_field(value.product_name, "product name")?,
            product_type: NonEmptyString::new_for_field(value.product_type, "product type")?,
            description: value.description.trim().to_string(),
            answers: value.answers,
        })
    }
}

/// Request body for `POST /api/generate-questions`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsForm {
    #[validate(length(min = 1))]
    pub product_type: String,
}

#[derive(Debug, Error)]
pub enum GenerateQuestionsFormError {
    #[error("{0}")]
    Validation(String),
}

impl From<ValidationErrors> for GenerateQuestionsFormError {
    fn from(_: ValidationErrors) -> Self {
        Self::Validation("Product type is required".to_string())
    }
}

impl GenerateQuestionsForm {
    pub fn into_product_type(self) -> Result<String, GenerateQuestionsFormError> {
        self.validate()?;
        Ok(self.product_type)
    }
}
