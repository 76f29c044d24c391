//! Parser module that coordinates the extraction cascade.

mod defaults;
mod enrich;
pub mod strategies;
mod validate;

pub use enrich::enrich_with_context;
pub use validate::validate;

use tracing::{debug, warn};

use defaults::{synthesize_default, DefaultReason};
use strategies::{
    ExtractionStrategy, FallbackBasicStrategy, JsonSimpleStrategy, JsonStructuredStrategy,
    MarkdownBlockStrategy, TextBulletedStrategy, TextNumberedStrategy, TextParagraphStrategy,
};

use crate::{
    model::{GenerationContext, ParsedResult},
    patterns::PatternLibrary,
};

/// Multi-strategy parser for raw generation output.
///
/// Strategies are tried in priority order; the first candidate that passes
/// the validator is enriched with caller context and returned. When the
/// cascade is exhausted (or the input is empty) the canned default result is
/// returned instead, flagged unsuccessful — [`parse`](Self::parse) is total
/// and never errors.
///
/// # Examples
///
/// ```
/// use prepparse::parser::ResponseParser;
///
/// let parser = ResponseParser::new();
/// let result = parser.parse("1. What is polymorphism?\n2. Explain REST APIs.");
/// assert!(result.success);
/// assert_eq!(result.questions.len(), 2);
/// ```
#[derive(Debug)]
pub struct ResponseParser {
    /// Shared read-only configuration.
    library: PatternLibrary,
    /// Extraction strategies in priority order.
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    /// Creates a parser with the built-in pattern library and the default
    /// cascade:
    ///
    /// 1. `JsonStructuredStrategy` - full JSON objects with metadata
    /// 2. `JsonSimpleStrategy` - JSON arrays of plain strings
    /// 3. `MarkdownBlockStrategy` - multi-line header + scenario blocks
    /// 4. `TextNumberedStrategy` - numbered lists
    /// 5. `TextBulletedStrategy` - bulleted lists
    /// 6. `TextParagraphStrategy` - sentence heuristics
    /// 7. `FallbackBasicStrategy` - any substantial prose line
    pub fn new() -> Self {
        Self::with_library(PatternLibrary::new())
    }

    /// Creates a parser with a custom pattern library.
    pub fn with_library(library: PatternLibrary) -> Self {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(JsonStructuredStrategy),
            Box::new(JsonSimpleStrategy),
            Box::new(MarkdownBlockStrategy),
            Box::new(TextNumberedStrategy),
            Box::new(TextBulletedStrategy),
            Box::new(TextParagraphStrategy),
            Box::new(FallbackBasicStrategy),
        ];
        Self::assemble(library, strategies)
    }

    /// Creates a parser with custom strategies, sorted by priority.
    pub fn with_strategies(
        library: PatternLibrary,
        strategies: Vec<Box<dyn ExtractionStrategy>>,
    ) -> Self {
        Self::assemble(library, strategies)
    }

    fn assemble(library: PatternLibrary, mut strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        strategies.sort_by_key(|s| s.priority());
        Self {
            library,
            strategies,
        }
    }

    /// Parses raw generation output without caller context.
    pub fn parse(&self, response: &str) -> ParsedResult {
        self.parse_with_context(response, GenerationContext::default())
    }

    /// Parses raw generation output, enriching the accepted result with
    /// caller context.
    ///
    /// Empty or whitespace-only input short-circuits straight to the default
    /// synthesizer without attempting any strategy.
    pub fn parse_with_context(&self, response: &str, context: GenerationContext) -> ParsedResult {
        if response.trim().is_empty() {
            debug!("empty input, synthesizing default result");
            return synthesize_default(&self.library, context, DefaultReason::EmptyInput);
        }

        let mut last_failure: Option<String> = None;

        for strategy in &self.strategies {
            let tag = strategy.strategy();
            match strategy.attempt(response, &self.library) {
                Ok(candidate) => match validate(&candidate, &self.library) {
                    Ok(()) => {
                        debug!(
                            strategy = tag.as_str(),
                            questions = candidate.questions.len(),
                            recommendations = candidate.recommendations.len(),
                            "candidate accepted"
                        );
                        return enrich_with_context(candidate, context, &self.library);
                    }
                    Err(reason) => {
                        debug!(strategy = tag.as_str(), %reason, "candidate rejected");
                        last_failure = Some(format!("{tag}: {reason}"));
                    }
                },
                Err(err) => {
                    debug!(strategy = tag.as_str(), %err, "strategy not applicable");
                    last_failure = Some(format!("{tag}: {err}"));
                }
            }
        }

        warn!("all extraction strategies failed, synthesizing default result");
        synthesize_default(
            &self.library,
            context,
            DefaultReason::CascadeExhausted(last_failure),
        )
    }

    /// Backward-compatible view returning only plain question texts and
    /// recommendations.
    pub fn parse_simple(&self, response: &str) -> (Vec<String>, Vec<String>) {
        let parsed = self.parse(response);
        (parsed.raw_questions, parsed.recommendations)
    }

    /// Returns the number of strategies in the cascade.
    #[inline]
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Returns the strategy tags in cascade order.
    pub fn strategy_order(&self) -> Vec<&'static str> {
        self.strategies
            .iter()
            .map(|s| s.strategy().as_str())
            .collect()
    }
}
