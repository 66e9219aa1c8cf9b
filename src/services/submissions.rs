use crate::domain::submission::Submission;
use crate::forms::submissions::{SubmitProductForm, SubmitProductFormPayload};
use crate::repository::{SubmissionReader, SubmissionWriter};

use super::{ServiceError, ServiceResult};

/// Core business logic for `POST /api/products`.
///
/// Validates the form, converts it into a draft and hands it to the store.
/// Repository errors are converted into `ServiceError` variants so that the
/// HTTP route can remain a thin wrapper.
pub fn submit_product<W>(form: SubmitProductForm, repo: &W) -> ServiceResult<Submission>
where
    W: SubmissionWriter,
{
    let payload = SubmitProductFormPayload::try_from(form)?;

    match repo.accept_submission(&payload.into_new_submission()) {
        Ok(submission) => Ok(submission),
        Err(e) => {
            log::error!("Failed to save product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Core business logic for `GET /api/products`.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Submission>>
where
    R: SubmissionReader,
{
    match repo.list_submissions() {
        Ok(submissions) => Ok(submissions),
        Err(e) => {
            log::error!("Failed to fetch products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::repository::test::FailingRepository;

    fn form(name: &str) -> SubmitProductForm {
        SubmitProductForm {
            product_name: name.to_string(),
            product_type: "Food".to_string(),
            description: "Tasty".to_string(),
            answers: BTreeMap::new(),
        }
    }

    #[test]
    fn submit_then_list_round_trips() {
        let repo = InMemoryRepository::new();

        let first = submit_product(form("First"), &repo).unwrap();
        let second = submit_product(form("Second"), &repo).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let listed = list_products(&repo).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].product_name.as_str(), "First");
        assert_eq!(listed[1].product_name.as_str(), "Second");
    }

    #[test]
    fn missing_name_is_a_validation_error() {
        let repo = InMemoryRepository::new();
        let mut invalid = form("");
        invalid.product_name = String::new();

        assert!(matches!(
            submit_product(invalid, &repo),
            Err(ServiceError::Validation(_))
        ));
        assert!(list_products(&repo).unwrap().is_empty());
    }

    #[test]
    fn store_failures_surface_as_internal() {
        assert_eq!(
            submit_product(form("First"), &FailingRepository).unwrap_err(),
            ServiceError::Internal
        );
        assert_eq!(
            list_products(&FailingRepository).unwrap_err(),
            ServiceError::Internal
        );
    }
}
