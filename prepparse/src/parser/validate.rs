//! Acceptance gate for candidate results.

use crate::{error::ValidationError, model::ParsedResult, patterns::PatternLibrary};

/// Accepts a candidate only if it has questions and every question's text
/// length lies within the library bounds (inclusive).
pub fn validate(candidate: &ParsedResult, library: &PatternLibrary) -> Result<(), ValidationError> {
    if candidate.questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    for (index, question) in candidate.questions.iter().enumerate() {
        let length = question.text.chars().count();
        if length < library.min_question_len || length > library.max_question_len {
            return Err(ValidationError::LengthOutOfBounds {
                index,
                length,
                min: library.min_question_len,
                max: library.max_question_len,
            });
        }
    }

    Ok(())
}
