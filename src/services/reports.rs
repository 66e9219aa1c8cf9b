use chrono::Utc;

use crate::domain::types::SubmissionId;
use crate::report::{self, report_file_name};
use crate::repository::SubmissionReader;

use super::{ServiceError, ServiceResult};

/// Self-contained file handed back to the HTTP layer for download.
#[derive(Debug, Clone)]
pub struct DownloadFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Core business logic for `GET /api/products/{id}/report`.
///
/// Looks the submission up, renders it to a PDF and names the file after
/// the product. Rendering errors are caught here as a whole; no partially
/// written document ever reaches the caller.
pub fn download_report<R>(product_id: i64, repo: &R) -> ServiceResult<DownloadFile>
where
    R: SubmissionReader,
{
    let id = match SubmissionId::new(product_id) {
        Ok(id) => id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let submission = match repo.get_submission_by_id(id) {
        Ok(Some(submission)) => submission,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to fetch product {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let bytes = match report::render(&submission, Utc::now()) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to render report for product {id}: {e}");
            return Err(ServiceError::Render(
                "Failed to generate report".to_string(),
            ));
        }
    };

    Ok(DownloadFile {
        file_name: report_file_name(submission.product_name.as_str()),
        content_type: "application/pdf",
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::submission::NewSubmission;
    use crate::domain::types::NonEmptyString;
    use crate::repository::test::FailingRepository;
    use crate::repository::{InMemoryRepository, SubmissionWriter};

    #[test]
    fn renders_a_stored_submission() {
        let repo = InMemoryRepository::new();
        let mut answers = BTreeMap::new();
        answers.insert("food_organic".to_string(), "Yes".to_string());
        repo.accept_submission(&NewSubmission {
            product_name: NonEmptyString::new("Pure Organic Honey").unwrap(),
            product_type: NonEmptyString::new("Food").unwrap(),
            description: "Raw honey".to_string(),
            answers,
        })
        .unwrap();

        let file = download_report(1, &repo).unwrap();
        assert_eq!(file.file_name, "Pure_Organic_Honey_Report.pdf");
        assert_eq!(file.content_type, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let repo = InMemoryRepository::new();
        assert_eq!(download_report(1, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(download_report(0, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(
            download_report(-4, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn store_failures_surface_as_internal() {
        assert_eq!(
            download_report(1, &FailingRepository).unwrap_err(),
            ServiceError::Internal
        );
    }
}
