//! Paragraph strategy: sentence splitting plus lead-phrase classification.

use std::collections::BTreeMap;

use super::ExtractionStrategy;
use crate::{
    error::StrategyError,
    model::{ParseStrategy, ParsedQuestion, ParsedResult},
    patterns::PatternLibrary,
};

/// Strategy for free-flowing prose.
///
/// The text is split on sentence terminators; segments that open with an
/// interrogative lead phrase become questions (regaining a `?`), segments
/// carrying a recommendation keyword become recommendations, and everything
/// else is discarded.
///
/// # Examples
///
/// ```
/// use prepparse::parser::strategies::{ExtractionStrategy, TextParagraphStrategy};
/// use prepparse::patterns::PatternLibrary;
///
/// let library = PatternLibrary::new();
/// let input = "Describe how DNS resolution works. You should review the RFC beforehand.";
/// let result = TextParagraphStrategy.attempt(input, &library).unwrap();
/// assert_eq!(result.questions.len(), 1);
/// assert_eq!(result.recommendations.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParagraphStrategy;

impl ExtractionStrategy for TextParagraphStrategy {
    #[inline]
    fn strategy(&self) -> ParseStrategy {
        ParseStrategy::TextParagraph
    }

    #[inline]
    fn priority(&self) -> u8 {
        6
    }

    fn attempt(
        &self,
        input: &str,
        library: &PatternLibrary,
    ) -> Result<ParsedResult, StrategyError> {
        let mut questions = Vec::new();
        let mut recommendations = Vec::new();

        for segment in input.split(['.', '!', '?']) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            if library.looks_like_question(segment) {
                let mut text = segment.to_string();
                if !text.ends_with('?') {
                    text.push('?');
                }
                questions.push(ParsedQuestion::new(text));
            } else if library.is_recommendation(segment) {
                recommendations.push(segment.to_string());
            }
        }

        if questions.is_empty() && recommendations.is_empty() {
            return Err(StrategyError::not_applicable("question-like sentences"));
        }

        Ok(ParsedResult::from_extraction(
            ParseStrategy::TextParagraph,
            questions,
            recommendations,
            BTreeMap::new(),
        ))
    }
}
