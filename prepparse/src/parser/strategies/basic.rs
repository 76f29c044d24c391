//! Last-resort line strategy with the loosest acceptance rules.

use std::collections::BTreeMap;

use super::ExtractionStrategy;
use crate::{
    error::StrategyError,
    model::{ParseStrategy, ParsedQuestion, ParsedResult},
    patterns::PatternLibrary,
};

/// Accepts any substantial prose line as a candidate question.
///
/// Sits last in the cascade. Lines below the length floor, markup lines, and
/// lines that do not read as prose (no alphabetic content, or containing
/// control characters) are skipped; the rest become questions or
/// recommendations, with a cap on how many unmarked lines are taken as
/// questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackBasicStrategy;

/// A line qualifies as prose when it has alphabetic content and no control
/// characters. Binary garbage that survives lossy decoding fails this.
fn looks_like_prose(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_control)
}

impl ExtractionStrategy for FallbackBasicStrategy {
    #[inline]
    fn strategy(&self) -> ParseStrategy {
        ParseStrategy::FallbackBasic
    }

    #[inline]
    fn priority(&self) -> u8 {
        7
    }

    fn attempt(
        &self,
        input: &str,
        library: &PatternLibrary,
    ) -> Result<ParsedResult, StrategyError> {
        let mut questions = Vec::new();
        let mut recommendations = Vec::new();

        for raw in input.lines() {
            let line = raw.trim();
            if line.is_empty() || line.chars().count() < library.min_question_len {
                continue;
            }
            if line.starts_with('#') || line.starts_with("===") || line.starts_with("---") {
                continue;
            }
            if !looks_like_prose(line) {
                continue;
            }

            if line.contains('?') || library.looks_like_question(line) {
                let mut text = line.to_string();
                if !text.ends_with('?') {
                    text.push('?');
                }
                questions.push(ParsedQuestion::new(text));
            } else if library.is_recommendation(line) {
                recommendations.push(line.to_string());
            } else if questions.len() < library.max_fallback_questions {
                questions.push(ParsedQuestion::new(line));
            }
        }

        if questions.is_empty() {
            return Err(StrategyError::Empty);
        }

        Ok(ParsedResult::from_extraction(
            ParseStrategy::FallbackBasic,
            questions,
            recommendations,
            BTreeMap::new(),
        ))
    }
}
