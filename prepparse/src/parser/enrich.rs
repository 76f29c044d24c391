//! Context enrichment for accepted results.

use serde_json::Value;

use crate::{
    model::{GenerationContext, InterviewType, ParsedResult, QuestionCategory},
    patterns::PatternLibrary,
};

/// Fills in missing difficulty/category fields from caller context and
/// records the context tags in the result metadata.
///
/// Only genuinely-missing fields are touched; anything a strategy already
/// extracted wins.
pub fn enrich_with_context(
    mut result: ParsedResult,
    context: GenerationContext,
    library: &PatternLibrary,
) -> ParsedResult {
    if context.is_empty() {
        return result;
    }

    if let Some(interview_type) = context.interview_type {
        result.metadata.insert(
            "interview_type".to_string(),
            Value::String(interview_type.as_str().to_string()),
        );
    }
    if let Some(level) = context.experience_level {
        result.metadata.insert(
            "experience_level".to_string(),
            Value::String(level.as_str().to_string()),
        );
    }

    for question in &mut result.questions {
        if question.difficulty.is_none() {
            if let Some(level) = context.experience_level {
                question.difficulty = Some(level.implied_difficulty());
            }
        }
        if question.category.is_none() {
            if let Some(interview_type) = context.interview_type {
                question.category = infer_category(interview_type, &question.text, library);
            }
        }
    }

    result
}

/// Maps an interview type to a question category.
///
/// Technical questions are refined by keyword; reverse-interview questions
/// stay uncategorized (no matching variant in the closed category set).
fn infer_category(
    interview_type: InterviewType,
    text: &str,
    library: &PatternLibrary,
) -> Option<QuestionCategory> {
    match interview_type {
        InterviewType::Technical => Some(library.infer_technical_category(text)),
        InterviewType::Behavioral => Some(QuestionCategory::Behavioral),
        InterviewType::CaseStudy => Some(QuestionCategory::CaseStudy),
        InterviewType::Reverse => None,
    }
}
