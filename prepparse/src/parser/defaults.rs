//! Default synthesizer: canned output when extraction fails entirely.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    model::{Difficulty, GenerationContext, ParseStrategy, ParsedQuestion, ParsedResult},
    patterns::PatternLibrary,
};

/// Why the synthesizer was invoked.
#[derive(Debug, Clone)]
pub(crate) enum DefaultReason {
    /// The input was empty or whitespace-only; no strategy was attempted.
    EmptyInput,
    /// Every strategy failed or was rejected; carries the last failure detail.
    CascadeExhausted(Option<String>),
}

impl DefaultReason {
    fn error_message(&self) -> String {
        match self {
            Self::EmptyInput => "empty input".to_string(),
            Self::CascadeExhausted(Some(detail)) => detail.clone(),
            Self::CascadeExhausted(None) => {
                "unable to parse response, using defaults".to_string()
            }
        }
    }

    fn reason_tag(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::CascadeExhausted(_) => "parsing_failed",
        }
    }
}

/// Builds the canned, type-appropriate result.
///
/// The output always carries five questions and five recommendations, so
/// callers never see an empty result even when parsing fails outright.
pub(crate) fn synthesize_default(
    library: &PatternLibrary,
    context: GenerationContext,
    reason: DefaultReason,
) -> ParsedResult {
    let difficulty = context
        .experience_level
        .map_or(Difficulty::Medium, |level| level.implied_difficulty());

    let questions: Vec<ParsedQuestion> = library
        .default_questions(context.interview_type)
        .into_iter()
        .map(|text| {
            let mut question = ParsedQuestion::new(text);
            question.difficulty = Some(difficulty);
            question.time_estimate = Some(library.default_time_estimate);
            question
        })
        .collect();

    let mut metadata = BTreeMap::new();
    metadata.insert("is_default".to_string(), Value::Bool(true));
    metadata.insert(
        "reason".to_string(),
        Value::String(reason.reason_tag().to_string()),
    );

    let mut result = ParsedResult::from_extraction(
        ParseStrategy::Default,
        questions,
        library.default_recommendations(),
        metadata,
    );
    result.success = false;
    result.error_message = Some(reason.error_message());
    result
}
