//! # prepparse
//!
//! A forgiving parser that turns free-form AI interview-prep output into a
//! structured list of questions and recommendations.
//!
//! Generations arrive as JSON, JSON wrapped in markdown fences, numbered or
//! bulleted lists, multi-line scenario blocks, or plain prose — and the shape
//! is not known in advance. This library runs an ordered cascade of
//! independent extraction strategies, gates each candidate through a
//! validator, enriches the accepted result with caller context, and falls
//! back to a canned default when nothing works. The result is never empty
//! and the parse call never fails.
//!
//! ## Quick Start
//!
//! ```rust
//! use prepparse::parse;
//!
//! let response = r#"{"questions": [
//!     {"question": "Explain the difference between a process and a thread.",
//!      "difficulty": "medium"}
//! ]}"#;
//!
//! let result = parse(response);
//! assert!(result.success);
//! assert_eq!(result.questions.len(), 1);
//! assert_eq!(result.strategy_used.as_str(), "json_structured");
//! ```
//!
//! ## Context enrichment
//!
//! Callers that know the interview type and experience level can pass them
//! along; missing difficulty and category fields are filled in from context:
//!
//! ```rust
//! use prepparse::{parse_with_context, ExperienceLevel, GenerationContext, InterviewType};
//!
//! let context = GenerationContext::new(InterviewType::Technical, ExperienceLevel::Senior);
//! let result = parse_with_context("1. How would you scale a websocket service?", context);
//!
//! assert!(result.success);
//! assert_eq!(result.questions[0].difficulty.unwrap().as_str(), "hard");
//! ```
//!
//! ## Graceful degradation
//!
//! When the input matches no strategy (or is empty), a type-appropriate
//! canned result is returned with `success = false` and a diagnostic
//! message — callers can treat `parse` as total:
//!
//! ```rust
//! use prepparse::parse;
//!
//! let result = parse("");
//! assert!(!result.success);
//! assert_eq!(result.strategy_used.as_str(), "default");
//! assert_eq!(result.questions.len(), 5);
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod patterns;

pub use model::{
    Difficulty, ExperienceLevel, GenerationContext, InterviewType, ParseStrategy, ParsedQuestion,
    ParsedResult, QuestionCategory,
};
pub use parser::ResponseParser;
pub use patterns::PatternLibrary;

use once_cell::sync::Lazy;

/// Process-wide parser with the built-in pattern library. Immutable, so
/// concurrent callers need no synchronization.
static DEFAULT_PARSER: Lazy<ResponseParser> = Lazy::new(ResponseParser::new);

/// Parses raw generation output with the default parser.
///
/// See [`ResponseParser::parse`].
pub fn parse(response: &str) -> ParsedResult {
    DEFAULT_PARSER.parse(response)
}

/// Parses raw generation output with the default parser, enriching the
/// result with caller context.
///
/// See [`ResponseParser::parse_with_context`].
pub fn parse_with_context(response: &str, context: GenerationContext) -> ParsedResult {
    DEFAULT_PARSER.parse_with_context(response, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structured_json() {
        let input = r#"{"questions": [{"question": "Explain ACID properties in databases."}]}"#;
        let result = parse(input);

        assert!(result.success);
        assert_eq!(result.strategy_used, ParseStrategy::JsonStructured);
        assert_eq!(result.raw_questions, vec!["Explain ACID properties in databases."]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let input = "Here are your questions:\n```json\n{\"questions\": [\"What is tail latency and why does it matter?\"]}\n```";
        let result = parse(input);

        assert!(result.success);
        assert_eq!(result.strategy_used, ParseStrategy::JsonSimple);
    }

    #[test]
    fn test_parse_never_empty() {
        for input in ["", "???", "x", "no structure here at all"] {
            let result = parse(input);
            assert!(!result.questions.is_empty(), "input {input:?} yielded no questions");
            assert!(!result.raw_questions.is_empty());
        }
    }

    #[test]
    fn test_context_enrichment_via_free_function() {
        let context = GenerationContext::new(InterviewType::Behavioral, ExperienceLevel::Mid);
        let result = parse_with_context("1. Describe a time you disagreed with your manager.", context);

        assert!(result.success);
        assert_eq!(result.questions[0].difficulty, Some(Difficulty::Medium));
        assert_eq!(
            result.questions[0].category,
            Some(QuestionCategory::Behavioral)
        );
        assert_eq!(result.metadata["interview_type"], "behavioral");
    }
}
