//! Static question catalog and category resolver.
//!
//! The catalog is a read-only mapping from product category to an ordered
//! question list, built once at process start. Unknown or empty category
//! labels fall back to the reserved [`FALLBACK_CATEGORY`] set, so resolution
//! is total. A small declared table of follow-up rules appends extra
//! questions keyed on specific prior answers; the rules gate nothing in the
//! main submission flow.

use std::collections::BTreeMap;

use crate::domain::question::{FollowUpRule, Question, QuestionKind};

/// Reserved category used when a requested label has no catalog entry.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Question sequence returned by [`ResolveQuestions::resolve`], together
/// with the category that was actually used.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuestions {
    /// The normalized catalog key, or [`FALLBACK_CATEGORY`] when the input
    /// had no match. Never the raw input.
    pub category: String,
    pub questions: Vec<Question>,
}

/// Seam between the workflow/services and the catalog.
pub trait ResolveQuestions {
    /// Map a possibly free-form category label to its question set.
    /// Total over all inputs, including the empty string.
    fn resolve(&self, label: &str) -> ResolvedQuestions;
}

/// The fixed collection of questions, partitioned by category.
pub struct QuestionCatalog {
    categories: Vec<(String, Vec<Question>)>,
    follow_ups: Vec<FollowUpRule>,
}

impl QuestionCatalog {
    pub fn new() -> Self {
        Self {
            categories: vec![
                ("Food".to_string(), food_questions()),
                ("Cosmetic".to_string(), cosmetic_questions()),
                ("Electronics".to_string(), electronics_questions()),
                ("Clothing".to_string(), clothing_questions()),
                (FALLBACK_CATEGORY.to_string(), fallback_questions()),
            ],
            follow_ups: follow_up_rules(),
        }
    }

    /// Category labels offered to the client, fallback included.
    pub fn product_types(&self) -> Vec<&str> {
        self.categories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Evaluate the follow-up rule table against a completed answer map.
    ///
    /// Each rule is checked independently; matches are returned in rule
    /// declaration order. Best-effort enrichment, not part of the stage
    /// guards.
    pub fn follow_ups(&self, answers: &BTreeMap<String, String>) -> Vec<Question> {
        self.follow_ups
            .iter()
            .filter(|rule| {
                answers
                    .get(rule.trigger_id)
                    .is_some_and(|value| value == rule.trigger_value)
            })
            .map(|rule| rule.question.clone())
            .collect()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveQuestions for QuestionCatalog {
    fn resolve(&self, label: &str) -> ResolvedQuestions {
        let normalized = normalize_category(label);
        let entry = self
            .categories
            .iter()
            .find(|(name, _)| *name == normalized)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|(name, _)| name == FALLBACK_CATEGORY)
            });

        match entry {
            Some((name, questions)) => ResolvedQuestions {
                category: name.clone(),
                questions: questions.clone(),
            },
            // The fallback entry is constructed in `new`; this arm is
            // unreachable but keeps resolution total without panicking.
            None => ResolvedQuestions {
                category: FALLBACK_CATEGORY.to_string(),
                questions: Vec::new(),
            },
        }
    }
}

/// Case-fold a free-form label to the catalog key convention: first letter
/// uppercase, rest lowercase.
fn normalize_category(label: &str) -> String {
    let trimmed = label.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn boolean(id: &str, prompt: &str, help: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::Boolean,
        choices: vec!["Yes".to_string(), "No".to_string()],
        placeholder: None,
        help: Some(help.to_string()),
    }
}

fn text(id: &str, prompt: &str, placeholder: &str, help: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::Text,
        choices: Vec::new(),
        placeholder: Some(placeholder.to_string()),
        help: Some(help.to_string()),
    }
}

fn select(id: &str, prompt: &str, choices: &[&str], help: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::Select,
        choices: choices.iter().map(|c| c.to_string()).collect(),
        placeholder: None,
        help: Some(help.to_string()),
    }
}

fn food_questions() -> Vec<Question> {
    vec![
        boolean(
            "food_preservatives",
            "Does this product contain any artificial preservatives or chemical additives?",
            "Helps consumers identify products with natural ingredients",
        ),
        boolean(
            "food_organic",
            "Is this product certified organic by recognized certification bodies (USDA, EU Organic, etc.)?",
            "Indicates adherence to organic farming standards",
        ),
        text(
            "food_allergens",
            "Please list all potential allergens present in this product (nuts, dairy, gluten, soy, eggs, shellfish, etc.)",
            "e.g., Contains: Milk, Soy. May contain traces of: Tree nuts",
            "Critical information for consumers with food allergies or intolerances",
        ),
        text(
            "food_nutritional",
            "What are the key nutritional highlights of this product?",
            "e.g., High in protein, Low in sugar, Rich in Omega-3",
            "Helps health-conscious consumers make informed decisions",
        ),
        select(
            "food_expiry",
            "What is the typical shelf life and recommended storage conditions?",
            &[
                "Less than 7 days (Highly Perishable)",
                "1-4 weeks (Perishable)",
                "1-6 months (Moderate Shelf Life)",
                "6-12 months (Long Shelf Life)",
                "Over 12 months (Extended Shelf Life)",
            ],
            "Ensures proper storage and consumption timing",
        ),
        select(
            "food_packaging",
            "What type of environmentally-conscious packaging is used for this product?",
            &[
                "100% Recyclable Plastic",
                "Glass (Reusable)",
                "Metal/Aluminum",
                "100% Biodegradable",
                "Compostable Paper/Cardboard",
                "Multi-Material (Partially Recyclable)",
            ],
            "Supports sustainable consumption and proper waste management",
        ),
        text(
            "food_certifications",
            "What quality certifications or standards does this product meet?",
            "e.g., FDA Approved, ISO 22000, HACCP, Kosher, Halal",
            "Demonstrates compliance with food safety and quality standards",
        ),
    ]
}

fn cosmetic_questions() -> Vec<Question> {
    vec![
        boolean(
            "cosmetic_cruelty_free",
            "Is this product cruelty-free and not tested on animals (certified by PETA, Leaping Bunny, or similar)?",
            "Important for ethical consumers and animal welfare advocates",
        ),
        boolean(
            "cosmetic_parabens",
            "Does this product contain parabens, sulfates, or other controversial preservatives?",
            "Helps consumers avoid potentially harmful chemicals",
        ),
        boolean(
            "cosmetic_vegan",
            "Is this product 100% vegan with no animal-derived ingredients?",
            "Essential for vegan lifestyle consumers",
        ),
        text(
            "cosmetic_ingredients",
            "What are the main active ingredients and their concentrations (if applicable)?",
            "e.g., 10% Niacinamide, 2% Hyaluronic Acid, Vitamin C Complex",
            "Allows consumers to understand product efficacy",
        ),
        select(
            "cosmetic_skin_type",
            "Which skin types and conditions is this product specifically formulated for?",
            &[
                "All Skin Types",
                "Dry/Dehydrated Skin",
                "Oily/Acne-Prone Skin",
                "Combination Skin",
                "Sensitive/Reactive Skin",
                "Mature/Aging Skin",
            ],
            "Ensures appropriate product selection for individual needs",
        ),
        boolean(
            "cosmetic_dermatologist",
            "Is this product dermatologically tested and hypoallergenic?",
            "Provides assurance of safety and reduced allergy risk",
        ),
        text(
            "cosmetic_spf",
            "Does this product contain SPF protection? If yes, what level?",
            "e.g., SPF 30, No SPF protection",
            "Critical information for sun protection and daily skincare",
        ),
    ]
}

fn electronics_questions() -> Vec<Question> {
    vec![
        select(
            "electronics_warranty",
            "What is the manufacturer warranty period and what does it cover?",
            &[
                "No Warranty",
                "3 Months Limited",
                "6 Months Limited",
                "1 Year Comprehensive",
                "2 Years Extended",
                "3+ Years Premium Coverage",
            ],
            "Protects consumer investment and ensures product quality",
        ),
        select(
            "electronics_energy_rating",
            "What is the official energy efficiency rating of this product?",
            &[
                "A+++ (Most Efficient)",
                "A++ (Very Efficient)",
                "A+ (Highly Efficient)",
                "A (Efficient)",
                "B (Moderate)",
                "C or Lower (Less Efficient)",
                "Not Rated/Not Applicable",
            ],
            "Helps consumers estimate operating costs and environmental impact",
        ),
        boolean(
            "electronics_recyclable",
            "Is this product designed for easy recycling with clearly marked recyclable components?",
            "Supports circular economy and proper e-waste management",
        ),
        text(
            "electronics_certifications",
            "What safety and quality certifications does this product hold?",
            "e.g., CE, FCC, RoHS, UL, Energy Star, ISO 9001",
            "Demonstrates compliance with international safety standards",
        ),
        select(
            "electronics_battery",
            "Does this product contain rechargeable or replaceable batteries?",
            &[
                "No Batteries",
                "Replaceable AA/AAA Batteries",
                "Replaceable Button Cells",
                "Built-in Rechargeable (Non-removable)",
                "Built-in Rechargeable (User-replaceable)",
            ],
            "Important for maintenance and environmental disposal",
        ),
        text(
            "electronics_connectivity",
            "What connectivity and compatibility features does this product offer?",
            "e.g., Wi-Fi 6, Bluetooth 5.0, USB-C, Compatible with iOS/Android",
            "Ensures integration with existing devices and systems",
        ),
    ]
}

fn clothing_questions() -> Vec<Question> {
    vec![
        text(
            "clothing_material",
            "What is the complete fabric composition and material breakdown?",
            "e.g., 95% Organic Cotton, 5% Elastane; Lining: 100% Recycled Polyester",
            "Helps consumers understand comfort, durability, and care requirements",
        ),
        boolean(
            "clothing_sustainable",
            "Is this product made from certified sustainable or eco-friendly materials (GOTS, OEKO-TEX, etc.)?",
            "Supports environmentally conscious fashion choices",
        ),
        boolean(
            "clothing_ethical",
            "Is this product ethically produced with fair labor practices and transparent supply chain?",
            "Ensures worker welfare and responsible manufacturing",
        ),
        select(
            "clothing_care",
            "What are the detailed care and maintenance instructions to ensure longevity?",
            &[
                "Machine Washable (Cold/Warm)",
                "Hand Wash Only (Delicate)",
                "Dry Clean Only (Professional)",
                "Special Care Required (See Label)",
                "No Special Care (Durable)",
            ],
            "Helps maintain product quality and extend garment life",
        ),
        text(
            "clothing_origin",
            "Where is this product manufactured and what is the country of origin?",
            "e.g., Made in Italy, Fabric from Turkey, Assembled in Portugal",
            "Provides transparency about manufacturing location",
        ),
        select(
            "clothing_sizing",
            "What sizing standard does this product follow and is it true-to-size?",
            &[
                "US Standard (True-to-size)",
                "European Sizing",
                "Asian Sizing (Runs Small)",
                "UK Sizing",
                "Oversized/Relaxed Fit",
                "Custom/Specialty Sizing",
            ],
            "Helps customers select the correct size for best fit",
        ),
    ]
}

fn fallback_questions() -> Vec<Question> {
    vec![
        boolean(
            "default_recyclable",
            "Is this product recyclable or does it have a take-back/recycling program?",
            "Supports responsible end-of-life product disposal",
        ),
        boolean(
            "default_ethical",
            "Is this product ethically sourced with transparent supply chain practices?",
            "Ensures responsible sourcing and fair trade practices",
        ),
        text(
            "default_materials",
            "What are the primary materials and components used in this product?",
            "e.g., Stainless steel frame, Bamboo handle, Silicone grip",
            "Helps consumers understand product composition and quality",
        ),
        select(
            "default_durability",
            "What is the expected product lifespan and durability rating?",
            &[
                "Light Use (1-2 years)",
                "Moderate Use (3-5 years)",
                "Heavy Use (5-10 years)",
                "Professional Grade (10+ years)",
                "Lifetime Durability",
            ],
            "Helps consumers assess long-term value and quality",
        ),
        text(
            "default_sustainability",
            "What sustainability initiatives or environmental certifications does this product have?",
            "e.g., Carbon-neutral shipping, B-Corp certified, 1% for the Planet member",
            "Demonstrates commitment to environmental responsibility",
        ),
        text(
            "default_warranty",
            "What warranty or guarantee is provided with this product?",
            "e.g., 30-day satisfaction guarantee, 2-year limited warranty",
            "Provides consumer protection and quality assurance",
        ),
    ]
}

fn follow_up_rules() -> Vec<FollowUpRule> {
    vec![
        FollowUpRule {
            trigger_id: "food_preservatives",
            trigger_value: "Yes",
            question: Question {
                id: "food_preservative_types".to_string(),
                prompt: "Which preservatives does it contain?".to_string(),
                kind: QuestionKind::Text,
                choices: Vec::new(),
                placeholder: Some("e.g., Sodium benzoate, Potassium sorbate...".to_string()),
                help: None,
            },
        },
        FollowUpRule {
            trigger_id: "cosmetic_cruelty_free",
            trigger_value: "No",
            question: Question {
                id: "cosmetic_testing_details".to_string(),
                prompt: "What type of animal testing was conducted?".to_string(),
                kind: QuestionKind::Text,
                choices: Vec::new(),
                placeholder: Some("Please provide details...".to_string()),
                help: None,
            },
        },
        FollowUpRule {
            trigger_id: "electronics_battery",
            trigger_value: "Yes",
            question: Question {
                id: "electronics_battery_type".to_string(),
                prompt: "What type of battery does it use?".to_string(),
                kind: QuestionKind::Select,
                choices: vec![
                    "Lithium-ion".to_string(),
                    "Alkaline".to_string(),
                    "Rechargeable".to_string(),
                    "Solar".to_string(),
                    "Other".to_string(),
                ],
                placeholder: None,
                help: None,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use super::*;

    #[test]
    fn every_category_resolves_to_unique_non_empty_questions() {
        let catalog = QuestionCatalog::new();
        for label in catalog.product_types() {
            let resolved = catalog.resolve(label);
            assert!(!resolved.questions.is_empty(), "{label} has no questions");
            let ids: HashSet<&str> = resolved.questions.iter().map(|q| q.id.as_str()).collect();
            assert_eq!(ids.len(), resolved.questions.len(), "{label} repeats ids");
        }
    }

    #[test]
    fn question_ids_are_unique_across_the_whole_catalog() {
        let catalog = QuestionCatalog::new();
        let mut seen = HashSet::new();
        for label in catalog.product_types() {
            for question in catalog.resolve(label).questions {
                assert!(seen.insert(question.id.clone()), "duplicate id {}", question.id);
            }
        }
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let catalog = QuestionCatalog::new();
        let resolved = catalog.resolve("  fOoD ");
        assert_eq!(resolved.category, "Food");
        assert_eq!(resolved.questions.len(), 7);
        assert_eq!(resolved.questions[0].id, "food_preservatives");
    }

    #[test]
    fn unknown_labels_fall_back_to_other() {
        let catalog = QuestionCatalog::new();
        let resolved = catalog.resolve("Gadgetry");
        assert_eq!(resolved.category, FALLBACK_CATEGORY);
        assert_eq!(resolved.questions.len(), 6);
        assert_eq!(resolved.questions[0].id, "default_recyclable");
    }

    #[test]
    fn empty_label_falls_back_to_other() {
        let catalog = QuestionCatalog::new();
        let resolved = catalog.resolve("");
        assert_eq!(resolved.category, FALLBACK_CATEGORY);
        assert!(!resolved.questions.is_empty());
    }

    #[test]
    fn follow_ups_match_rules_independently_in_declaration_order() {
        let catalog = QuestionCatalog::new();
        let mut answers = BTreeMap::new();
        answers.insert("food_preservatives".to_string(), "Yes".to_string());
        answers.insert("cosmetic_cruelty_free".to_string(), "No".to_string());
        answers.insert("electronics_battery".to_string(), "No Batteries".to_string());

        let follow_ups = catalog.follow_ups(&answers);
        let ids: Vec<&str> = follow_ups.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["food_preservative_types", "cosmetic_testing_details"]);
    }

    #[test]
    fn follow_ups_are_empty_without_matching_answers() {
        let catalog = QuestionCatalog::new();
        let mut answers = BTreeMap::new();
        answers.insert("food_preservatives".to_string(), "No".to_string());
        assert!(catalog.follow_ups(&answers).is_empty());
    }
}
