//! Error conversion glue between layers.
//!
//! Form and domain error types must not depend on the service layer, so the
//! `From` impls that collapse them into [`ServiceError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::submissions::{GenerateQuestionsFormError, SubmitProductFormError};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<SubmitProductFormError> for ServiceError {
    fn from(val: SubmitProductFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<GenerateQuestionsFormError> for ServiceError {
    fn from(val: GenerateQuestionsFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}
