//! The three-stage submission workflow.
//!
//! One instance exists per user interaction session. Every transition takes
//! `&mut self`, so no two stage changes can be in flight at once for a given
//! instance; the store itself serializes accepts across sessions.

use std::collections::BTreeMap;

use crate::catalog::ResolveQuestions;
use crate::domain::question::Question;
use crate::domain::submission::{NewSubmission, Submission};
use crate::domain::types::NonEmptyString;
use crate::repository::SubmissionWriter;

use super::{ServiceError, ServiceResult};

/// Client-visible stage of the submission workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    BasicInfo,
    Questionnaire,
    Review,
}

/// In-progress draft state collected across the three stages.
///
/// Successful submission clears everything and returns to
/// [`WorkflowStage::BasicInfo`]; failed submission keeps the draft intact so
/// the user can retry without re-entering data.
pub struct SubmissionWorkflow {
    stage: WorkflowStage,
    product_name: String,
    product_type: String,
    description: String,
    resolved_category: String,
    questions: Vec<Question>,
    answers: BTreeMap<String, String>,
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self {
            stage: WorkflowStage::BasicInfo,
            product_name: String::new(),
            product_type: String::new(),
            description: String::new(),
            resolved_category: String::new(),
            questions: Vec::new(),
            answers: BTreeMap::new(),
        }
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub fn set_product_name(&mut self, value: impl Into<String>) {
        self.product_name = value.into();
    }

    pub fn set_product_type(&mut self, value: impl Into<String>) {
        self.product_type = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    /// Questions resolved for the current draft, empty before the
    /// questionnaire stage has been entered.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Category actually used by the resolver, which may differ from the
    /// entered product type when the catalog fell back.
    pub fn resolved_category(&self) -> &str {
        &self.resolved_category
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    /// `BasicInfo -> Questionnaire`.
    ///
    /// Guarded on all three basic fields being non-empty after trimming. The
    /// resolver is invoked exactly once, only when the guard passes.
    pub fn begin_questionnaire<Q>(&mut self, resolver: &Q) -> ServiceResult<()>
    where
        Q: ResolveQuestions,
    {
        if self.stage != WorkflowStage::BasicInfo {
            return Err(ServiceError::Validation(
                "Questionnaire can only be started from the basic info step".to_string(),
            ));
        }
        if self.product_name.trim().is_empty()
            || self.product_type.trim().is_empty()
            || self.description.trim().is_empty()
        {
            return Err(ServiceError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        let resolved = resolver.resolve(&self.product_type);
        self.resolved_category = resolved.category;
        self.questions = resolved.questions;
        self.stage = WorkflowStage::Questionnaire;
        Ok(())
    }

    /// Record an answer for one of the displayed questions.
    ///
    /// Ids outside the current question sequence are rejected, which keeps
    /// the answer keys a subset of the displayed ids before finalization.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        value: impl Into<String>,
    ) -> ServiceResult<()> {
        if self.stage != WorkflowStage::Questionnaire {
            return Err(ServiceError::Validation(
                "Answers can only be recorded during the questionnaire step".to_string(),
            ));
        }
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(ServiceError::Validation(format!(
                "Unknown question: {question_id}"
            )));
        }
        self.answers.insert(question_id.to_string(), value.into());
        Ok(())
    }

    /// `Questionnaire -> Review`.
    ///
    /// Guarded on every displayed question carrying a non-empty answer; the
    /// error enumerates the unanswered ids.
    pub fn begin_review(&mut self) -> ServiceResult<()> {
        if self.stage != WorkflowStage::Questionnaire {
            return Err(ServiceError::Validation(
                "Review can only be entered from the questionnaire step".to_string(),
            ));
        }

        let unanswered: Vec<&str> = self
            .questions
            .iter()
            .filter(|q| {
                self.answers
                    .get(&q.id)
                    .is_none_or(|answer| answer.trim().is_empty())
            })
            .map(|q| q.id.as_str())
            .collect();
        if !unanswered.is_empty() {
            return Err(ServiceError::Validation(format!(
                "Please answer all questions ({} unanswered: {})",
                unanswered.len(),
                unanswered.join(", ")
            )));
        }

        self.stage = WorkflowStage::Review;
        Ok(())
    }

    /// Submit path: hand the assembled draft to the store.
    ///
    /// On success the machine resets to `BasicInfo` and returns the stored
    /// record. On failure it remains in `Review` with all draft fields
    /// preserved for retry.
    pub fn submit<W>(&mut self, repo: &W) -> ServiceResult<Submission>
    where
        W: SubmissionWriter,
    {
        if self.stage != WorkflowStage::Review {
            return Err(ServiceError::Validation(
                "Submission is only possible from the review step".to_string(),
            ));
        }

        let draft = NewSubmission {
            product_name: NonEmptyString::new_for_field(self.product_name.clone(), "product name")?,
            product_type: NonEmptyString::new_for_field(self.product_type.clone(), "product type")?,
            description: self.description.trim().to_string(),
            answers: self.answers.clone(),
        };

        match repo.accept_submission(&draft) {
            Ok(submission) => {
                self.reset();
                Ok(submission)
            }
            Err(e) => {
                log::error!("Failed to submit product: {e}");
                Err(ServiceError::Upstream(
                    "Failed to submit product".to_string(),
                ))
            }
        }
    }

    /// User-initiated backward transition. Never guarded and never clears
    /// already-entered data. A no-op in `BasicInfo`.
    pub fn back(&mut self) {
        self.stage = match self.stage {
            WorkflowStage::BasicInfo => WorkflowStage::BasicInfo,
            WorkflowStage::Questionnaire => WorkflowStage::BasicInfo,
            WorkflowStage::Review => WorkflowStage::Questionnaire,
        };
    }

    /// Clear all in-progress fields and return to `BasicInfo`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SubmissionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{QuestionCatalog, ResolvedQuestions};
    use crate::domain::question::QuestionKind;
    use crate::repository::InMemoryRepository;
    use crate::repository::SubmissionReader;
    use crate::repository::test::FailingRepository;

    fn filled_workflow() -> SubmissionWorkflow {
        let mut workflow = SubmissionWorkflow::new();
        workflow.set_product_name("Pure Organic Honey");
        workflow.set_product_type("Food");
        workflow.set_description("Raw honey from small apiaries");
        workflow
    }

    fn answer_all(workflow: &mut SubmissionWorkflow) {
        let ids: Vec<String> = workflow.questions().iter().map(|q| q.id.clone()).collect();
        for id in ids {
            workflow.record_answer(&id, "Yes").unwrap();
        }
    }

    /// Resolver double counting invocations.
    struct CountingResolver {
        calls: std::cell::Cell<usize>,
    }

    impl ResolveQuestions for CountingResolver {
        fn resolve(&self, label: &str) -> ResolvedQuestions {
            self.calls.set(self.calls.get() + 1);
            ResolvedQuestions {
                category: label.to_string(),
                questions: vec![crate::domain::question::Question {
                    id: "only_question".to_string(),
                    prompt: "The only question".to_string(),
                    kind: QuestionKind::Text,
                    choices: Vec::new(),
                    placeholder: None,
                    help: None,
                }],
            }
        }
    }

    #[test]
    fn starts_in_basic_info() {
        let workflow = SubmissionWorkflow::new();
        assert_eq!(workflow.stage(), WorkflowStage::BasicInfo);
        assert!(workflow.questions().is_empty());
    }

    #[test]
    fn basic_info_guard_blocks_on_any_empty_field() {
        let catalog = QuestionCatalog::new();
        let resolver = CountingResolver {
            calls: std::cell::Cell::new(0),
        };

        let mut workflow = SubmissionWorkflow::new();
        workflow.set_product_name("Honey");
        workflow.set_product_type("Food");
        workflow.set_description("   ");
        assert!(matches!(
            workflow.begin_questionnaire(&resolver),
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(workflow.stage(), WorkflowStage::BasicInfo);
        // The resolver must not be invoked on the guard-failure path.
        assert_eq!(resolver.calls.get(), 0);

        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&catalog).unwrap();
        assert_eq!(workflow.stage(), WorkflowStage::Questionnaire);
    }

    #[test]
    fn begin_questionnaire_resolves_exactly_once() {
        let resolver = CountingResolver {
            calls: std::cell::Cell::new(0),
        };
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&resolver).unwrap();
        assert_eq!(resolver.calls.get(), 1);
        assert_eq!(workflow.questions().len(), 1);
    }

    #[test]
    fn unknown_type_reports_the_fallback_category() {
        let catalog = QuestionCatalog::new();
        let mut workflow = filled_workflow();
        workflow.set_product_type("Widgets");
        workflow.begin_questionnaire(&catalog).unwrap();
        assert_eq!(workflow.resolved_category(), "Other");
    }

    #[test]
    fn record_answer_rejects_ids_outside_the_question_set() {
        let catalog = QuestionCatalog::new();
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&catalog).unwrap();

        assert!(workflow.record_answer("food_organic", "Yes").is_ok());
        assert!(matches!(
            workflow.record_answer("clothing_material", "Cotton"),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn review_guard_blocks_while_questions_are_unanswered() {
        let catalog = QuestionCatalog::new();
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&catalog).unwrap();

        let err = workflow.begin_review().unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                assert!(message.contains("7 unanswered"));
                assert!(message.contains("food_organic"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(workflow.stage(), WorkflowStage::Questionnaire);

        answer_all(&mut workflow);
        workflow.begin_review().unwrap();
        assert_eq!(workflow.stage(), WorkflowStage::Review);
    }

    #[test]
    fn review_guard_handles_a_single_question() {
        let resolver = CountingResolver {
            calls: std::cell::Cell::new(0),
        };
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&resolver).unwrap();

        assert!(workflow.begin_review().is_err());
        workflow.record_answer("only_question", "An answer").unwrap();
        workflow.begin_review().unwrap();
        assert_eq!(workflow.stage(), WorkflowStage::Review);
    }

    #[test]
    fn whitespace_answers_do_not_satisfy_the_review_guard() {
        let resolver = CountingResolver {
            calls: std::cell::Cell::new(0),
        };
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&resolver).unwrap();
        workflow.record_answer("only_question", "   ").unwrap();
        assert!(workflow.begin_review().is_err());
    }

    #[test]
    fn back_never_clears_entered_data() {
        let catalog = QuestionCatalog::new();
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&catalog).unwrap();
        answer_all(&mut workflow);
        workflow.begin_review().unwrap();

        workflow.back();
        assert_eq!(workflow.stage(), WorkflowStage::Questionnaire);
        assert_eq!(workflow.answers().len(), 7);

        workflow.back();
        assert_eq!(workflow.stage(), WorkflowStage::BasicInfo);
        assert_eq!(workflow.answers().len(), 7);

        workflow.back();
        assert_eq!(workflow.stage(), WorkflowStage::BasicInfo);
    }

    #[test]
    fn successful_submission_resets_the_workflow() {
        let catalog = QuestionCatalog::new();
        let repo = InMemoryRepository::new();
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&catalog).unwrap();
        answer_all(&mut workflow);
        workflow.begin_review().unwrap();

        let submission = workflow.submit(&repo).unwrap();
        assert_eq!(submission.id, 1);
        assert_eq!(submission.product_name.as_str(), "Pure Organic Honey");

        assert_eq!(workflow.stage(), WorkflowStage::BasicInfo);
        assert!(workflow.questions().is_empty());
        assert!(workflow.answers().is_empty());
        assert_eq!(workflow.resolved_category(), "");

        assert_eq!(repo.list_submissions().unwrap().len(), 1);
    }

    #[test]
    fn failed_submission_preserves_the_draft_for_retry() {
        let catalog = QuestionCatalog::new();
        let mut workflow = filled_workflow();
        workflow.begin_questionnaire(&catalog).unwrap();
        answer_all(&mut workflow);
        workflow.begin_review().unwrap();

        let err = workflow.submit(&FailingRepository).unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(_)));
        assert_eq!(workflow.stage(), WorkflowStage::Review);
        assert_eq!(workflow.answers().len(), 7);

        // Retry against a working store succeeds without re-entering data.
        let repo = InMemoryRepository::new();
        let submission = workflow.submit(&repo).unwrap();
        assert_eq!(submission.answers.len(), 7);
        assert_eq!(workflow.stage(), WorkflowStage::BasicInfo);
    }

    #[test]
    fn submit_is_rejected_outside_review() {
        let repo = InMemoryRepository::new();
        let mut workflow = filled_workflow();
        assert!(matches!(
            workflow.submit(&repo),
            Err(ServiceError::Validation(_))
        ));
    }
}
