//! Numbered and bulleted list strategies.
//!
//! Both run the same section-aware line scanner; they differ only in which
//! marker is allowed to produce questions. The non-primary marker still
//! routes content into recommendations, since a `Tips:` section frequently
//! switches marker style mid-list.

use std::collections::BTreeMap;

use regex::Regex;

use super::ExtractionStrategy;
use crate::{
    error::StrategyError,
    model::{ParseStrategy, ParsedQuestion, ParsedResult},
    patterns::{strip_emphasis, PatternLibrary, Section},
};

fn scan(
    input: &str,
    library: &PatternLibrary,
    primary: &Regex,
    secondary: &Regex,
) -> (Vec<ParsedQuestion>, Vec<String>, bool) {
    let mut questions = Vec::new();
    let mut recommendations = Vec::new();
    let mut section: Option<Section> = None;
    let mut headers_seen = false;

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        // Marker lines are list content even when short enough to pass the
        // header test ("- Review OOP basics" is a recommendation, not a
        // header), so they are matched first.
        if let Some(captures) = primary.captures(line) {
            let content = strip_emphasis(captures.get(1).map_or("", |m| m.as_str()));
            if content.is_empty() {
                continue;
            }
            if section == Some(Section::Recommendations) || library.is_recommendation(&content) {
                recommendations.push(content);
            } else {
                questions.push(ParsedQuestion::new(content));
            }
        } else if let Some(captures) = secondary.captures(line) {
            // The other marker never yields questions for this strategy, but
            // a recommendations section may legitimately mix markers.
            let content = strip_emphasis(captures.get(1).map_or("", |m| m.as_str()));
            if content.is_empty() {
                continue;
            }
            if section == Some(Section::Recommendations) || library.is_recommendation(&content) {
                recommendations.push(content);
            }
        } else if library.is_section_header(line) {
            headers_seen = true;
            if let Some(kind) = library.classify_header(line) {
                section = Some(kind);
            }
        }
    }

    (questions, recommendations, headers_seen)
}

/// Sweeps the whole text with the primary pattern, ignoring sections.
fn generic_sweep(input: &str, library: &PatternLibrary, primary: &Regex) -> Vec<ParsedQuestion> {
    let mut questions = Vec::new();
    for raw in input.lines() {
        let line = raw.trim();
        if let Some(captures) = primary.captures(line) {
            let content = strip_emphasis(captures.get(1).map_or("", |m| m.as_str()));
            if content.chars().count() >= library.min_question_len {
                questions.push(ParsedQuestion::new(content));
            }
        }
    }
    questions
}

fn attempt_with_markers(
    tag: ParseStrategy,
    input: &str,
    library: &PatternLibrary,
    primary: &Regex,
    secondary: &Regex,
) -> Result<ParsedResult, StrategyError> {
    let (mut questions, recommendations, headers_seen) = scan(input, library, primary, secondary);

    // With no section structure and no questions, retry the primary pattern
    // with no section awareness (keyword routing may have claimed everything
    // for recommendations).
    if !headers_seen && questions.is_empty() {
        questions = generic_sweep(input, library, primary);
    }

    if questions.is_empty() && recommendations.is_empty() {
        return Err(StrategyError::not_applicable("list-formatted lines"));
    }

    Ok(ParsedResult::from_extraction(
        tag,
        questions,
        recommendations,
        BTreeMap::new(),
    ))
}

/// Strategy for numbered lists (`1.` / `1)`).
///
/// # Examples
///
/// ```
/// use prepparse::parser::strategies::{ExtractionStrategy, TextNumberedStrategy};
/// use prepparse::patterns::PatternLibrary;
///
/// let library = PatternLibrary::new();
/// let input = "1. What is polymorphism?\n2. Explain REST APIs.";
/// let result = TextNumberedStrategy.attempt(input, &library).unwrap();
/// assert_eq!(result.questions.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNumberedStrategy;

impl ExtractionStrategy for TextNumberedStrategy {
    #[inline]
    fn strategy(&self) -> ParseStrategy {
        ParseStrategy::TextNumbered
    }

    #[inline]
    fn priority(&self) -> u8 {
        4
    }

    fn attempt(
        &self,
        input: &str,
        library: &PatternLibrary,
    ) -> Result<ParsedResult, StrategyError> {
        attempt_with_markers(
            ParseStrategy::TextNumbered,
            input,
            library,
            &library.numbered_line,
            &library.bulleted_line,
        )
    }
}

/// Strategy for bulleted lists (`•`, `-`, `*`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBulletedStrategy;

impl ExtractionStrategy for TextBulletedStrategy {
    #[inline]
    fn strategy(&self) -> ParseStrategy {
        ParseStrategy::TextBulleted
    }

    #[inline]
    fn priority(&self) -> u8 {
        5
    }

    fn attempt(
        &self,
        input: &str,
        library: &PatternLibrary,
    ) -> Result<ParsedResult, StrategyError> {
        attempt_with_markers(
            ParseStrategy::TextBulleted,
            input,
            library,
            &library.bulleted_line,
            &library.numbered_line,
        )
    }
}
