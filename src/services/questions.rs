use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{QuestionCatalog, ResolveQuestions};
use crate::domain::question::Question;
use crate::forms::submissions::GenerateQuestionsForm;

use super::ServiceResult;

/// Metadata attached to every generated question set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSetMetadata {
    pub generated_at: DateTime<Utc>,
    /// The category actually used, after normalization and fallback.
    pub product_type: String,
    pub question_count: usize,
    pub ai_model: &'static str,
    pub note: &'static str,
}

/// A resolved question set together with its generation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
    pub metadata: QuestionSetMetadata,
}

/// Resolve the questionnaire for a product type.
///
/// Validates the form, resolves against the catalog (falling back for
/// unknown labels) and stamps the metadata. Resolution itself never fails.
pub fn generate_questions<Q>(form: GenerateQuestionsForm, resolver: &Q) -> ServiceResult<QuestionSet>
where
    Q: ResolveQuestions,
{
    let product_type = form.into_product_type()?;
    let resolved = resolver.resolve(&product_type);

    Ok(QuestionSet {
        metadata: QuestionSetMetadata {
            generated_at: Utc::now(),
            product_type: resolved.category,
            question_count: resolved.questions.len(),
            ai_model: "Rule-based simulation (v1.0)",
            note: "In production, this would use GPT-4, Gemini, or custom ML models",
        },
        questions: resolved.questions,
    })
}

/// Conditional follow-up questions for a completed answer map.
///
/// Disconnected enrichment: exposed for callers that want it, gating no
/// workflow transition.
pub fn follow_up_questions(
    answers: &BTreeMap<String, String>,
    catalog: &QuestionCatalog,
) -> Vec<Question> {
    catalog.follow_ups(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;

    #[test]
    fn generates_the_food_set_with_metadata() {
        let catalog = QuestionCatalog::new();
        let form = GenerateQuestionsForm {
            product_type: "food".to_string(),
        };

        let set = generate_questions(form, &catalog).unwrap();
        assert_eq!(set.metadata.product_type, "Food");
        assert_eq!(set.metadata.question_count, 7);
        assert_eq!(set.metadata.ai_model, "Rule-based simulation (v1.0)");
        assert!(set.metadata.note.starts_with("In production"));
        assert_eq!(set.questions.len(), 7);
    }

    #[test]
    fn unknown_types_report_the_fallback_category() {
        let catalog = QuestionCatalog::new();
        let form = GenerateQuestionsForm {
            product_type: "Spacecraft".to_string(),
        };

        let set = generate_questions(form, &catalog).unwrap();
        assert_eq!(set.metadata.product_type, "Other");
        assert!(!set.questions.is_empty());
    }

    #[test]
    fn empty_type_is_a_validation_error() {
        let catalog = QuestionCatalog::new();
        let form = GenerateQuestionsForm {
            product_type: String::new(),
        };

        assert!(matches!(
            generate_questions(form, &catalog),
            Err(ServiceError::Validation(_))
        ));
    }
}
