use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::domain::submission::{NewSubmission, Submission};
use crate::domain::types::SubmissionId;
use crate::repository::{
    RepositoryError, RepositoryResult, SubmissionReader, SubmissionWriter,
};

struct StoreState {
    next_id: i64,
    submissions: Vec<Submission>,
}

/// In-memory submission store.
///
/// The counter and the ordered collection live under a single mutex so that
/// id assignment and append are serialized across sessions. The inner `Arc`
/// makes the repository cheap to clone and share between handlers. State is
/// lost on process restart.
#[derive(Clone)]
pub struct InMemoryRepository {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                next_id: 1,
                submissions: Vec::new(),
            })),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionReader for InMemoryRepository {
    fn list_submissions(&self) -> RepositoryResult<Vec<Submission>> {
        let state = self.state.lock().map_err(|_| RepositoryError::Poisoned)?;
        Ok(state.submissions.clone())
    }

    fn get_submission_by_id(&self, id: SubmissionId) -> RepositoryResult<Option<Submission>> {
        let state = self.state.lock().map_err(|_| RepositoryError::Poisoned)?;
        Ok(state.submissions.iter().find(|s| s.id == id).cloned())
    }
}

impl SubmissionWriter for InMemoryRepository {
    fn accept_submission(&self, draft: &NewSubmission) -> RepositoryResult<Submission> {
        let mut state = self.state.lock().map_err(|_| RepositoryError::Poisoned)?;
        let id = SubmissionId::new(state.next_id)
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        state.next_id += 1;

        let submission = Submission {
            id,
            product_name: draft.product_name.clone(),
            product_type: draft.product_type.clone(),
            description: draft.description.clone(),
            answers: draft.answers.clone(),
            submitted_at: Utc::now(),
        };
        state.submissions.push(submission.clone());
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::types::NonEmptyString;

    fn draft(name: &str) -> NewSubmission {
        NewSubmission {
            product_name: NonEmptyString::new(name).unwrap(),
            product_type: NonEmptyString::new("Food").unwrap(),
            description: "A test product".to_string(),
            answers: BTreeMap::new(),
        }
    }

    #[test]
    fn accept_assigns_strictly_increasing_ids_from_one() {
        let repo = InMemoryRepository::new();
        let first = repo.accept_submission(&draft("First")).unwrap();
        let second = repo.accept_submission(&draft("Second")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.id < second.id);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let repo = InMemoryRepository::new();
        repo.accept_submission(&draft("First")).unwrap();
        repo.accept_submission(&draft("Second")).unwrap();
        repo.accept_submission(&draft("Third")).unwrap();

        let names: Vec<String> = repo
            .list_submissions()
            .unwrap()
            .into_iter()
            .map(|s| s.product_name.into_inner())
            .collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn clones_share_the_same_store() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();
        clone.accept_submission(&draft("Shared")).unwrap();

        let listed = repo.list_submissions().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].product_name.as_str(), "Shared");
    }

    #[test]
    fn get_by_id_finds_stored_records() {
        let repo = InMemoryRepository::new();
        let stored = repo.accept_submission(&draft("Lookup")).unwrap();

        let found = repo.get_submission_by_id(stored.id).unwrap();
        assert_eq!(found, Some(stored));

        let missing = repo
            .get_submission_by_id(SubmissionId::new(99).unwrap())
            .unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn accepts_are_serialized_across_threads() {
        let repo = InMemoryRepository::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                std::thread::spawn(move || {
                    repo.accept_submission(&draft(&format!("Product {i}"))).unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ids: Vec<i64> = repo
            .list_submissions()
            .unwrap()
            .into_iter()
            .map(|s| s.id.get())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
    }
}
