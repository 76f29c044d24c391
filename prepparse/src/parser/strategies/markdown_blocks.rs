//! Markdown question-block strategy.
//!
//! Generations often emit one short header per question followed by several
//! lines of scenario/question prose. A plain numbered-line parser would read
//! only the header and silently discard the substance, so this strategy
//! reassembles each header-led block into one logical question.

use std::collections::BTreeMap;

use super::ExtractionStrategy;
use crate::{
    error::StrategyError,
    model::{ParseStrategy, ParsedQuestion, ParsedResult},
    patterns::{strip_emphasis, PatternLibrary},
};

/// Per-line state machine that reassembles multi-line question blocks.
///
/// A header line opens a block; subsequent lines accumulate into it until a
/// metadata line (a dash with a bolded label, or an assessment/rationale
/// marker) seals the block, or the next header closes it. Blocks are joined
/// with single spaces and stripped of emphasis markers before the length
/// floor is applied.
///
/// The strategy declines when no header pattern matches anywhere: plain
/// numbered lists belong to the numbered strategy. When headers match but
/// yield fewer than two questions, a numbered-line sweep over the remaining
/// lines supplements the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownBlockStrategy;

impl MarkdownBlockStrategy {
    /// Joins and cleans an accumulated block, emitting it if long enough.
    fn finalize(parts: Vec<String>, library: &PatternLibrary, questions: &mut Vec<ParsedQuestion>) {
        let text = strip_emphasis(&parts.join(" "));
        if text.chars().count() >= library.min_question_len {
            questions.push(ParsedQuestion::new(text));
        }
    }

    /// Sweeps plain numbered lines, skipping anything a header pattern owns.
    fn numbered_sweep(
        input: &str,
        library: &PatternLibrary,
        questions: &mut Vec<ParsedQuestion>,
    ) {
        for raw in input.lines() {
            let line = raw.trim();
            if line.is_empty() || library.match_question_header(line).is_some() {
                continue;
            }
            if let Some(captures) = library.numbered_line.captures(line) {
                let content = strip_emphasis(captures.get(1).map_or("", |m| m.as_str()));
                if content.chars().count() >= library.min_question_len {
                    questions.push(ParsedQuestion::new(content));
                }
            }
        }
    }
}

impl ExtractionStrategy for MarkdownBlockStrategy {
    #[inline]
    fn strategy(&self) -> ParseStrategy {
        ParseStrategy::MarkdownBlocks
    }

    #[inline]
    fn priority(&self) -> u8 {
        3
    }

    fn attempt(
        &self,
        input: &str,
        library: &PatternLibrary,
    ) -> Result<ParsedResult, StrategyError> {
        let mut questions = Vec::new();
        let mut accumulator: Option<Vec<String>> = None;
        let mut sealed = false;
        let mut headers_seen = 0usize;

        for raw in input.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(title) = library.match_question_header(line) {
                headers_seen += 1;
                if let Some(parts) = accumulator.take() {
                    Self::finalize(parts, library, &mut questions);
                }
                accumulator = Some(vec![title]);
                sealed = false;
                continue;
            }

            if sealed || accumulator.is_none() {
                continue;
            }

            if library.metadata_line.is_match(line) {
                sealed = true;
                continue;
            }

            let content = line.trim_start_matches('-').trim();
            if content.is_empty() {
                continue;
            }
            if let Some(parts) = accumulator.as_mut() {
                parts.push(content.to_string());
            }
        }

        if let Some(parts) = accumulator.take() {
            Self::finalize(parts, library, &mut questions);
        }

        if headers_seen == 0 {
            return Err(StrategyError::not_applicable("question header blocks"));
        }

        if questions.len() < library.min_block_questions {
            Self::numbered_sweep(input, library, &mut questions);
        }

        if questions.is_empty() {
            return Err(StrategyError::Empty);
        }

        Ok(ParsedResult::from_extraction(
            ParseStrategy::MarkdownBlocks,
            questions,
            Vec::new(),
            BTreeMap::new(),
        ))
    }
}
