//! Data model for parsed generations.
//!
//! The closed enums here mirror the vocabulary of the upstream prompt
//! catalog. Loose string values from generations are resolved through the
//! `from_loose` constructors, which map unknown spellings to `None` instead
//! of erroring so enrichment can later fill only genuinely-missing fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Returns the snake_case identifier for this difficulty.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Resolves a loose string value, case-insensitively.
    ///
    /// Unknown values resolve to `None` rather than erroring.
    pub fn from_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Question category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Algorithms,
    SystemDesign,
    Coding,
    Conceptual,
    Behavioral,
    CaseStudy,
}

impl QuestionCategory {
    /// Returns the snake_case identifier for this category.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Algorithms => "algorithms",
            Self::SystemDesign => "system_design",
            Self::Coding => "coding",
            Self::Conceptual => "conceptual",
            Self::Behavioral => "behavioral",
            Self::CaseStudy => "case_study",
        }
    }

    /// Resolves a loose string value, case-insensitively.
    ///
    /// Accepts snake_case, hyphenated, and space-separated spellings.
    /// Unknown values resolve to `None` rather than erroring.
    pub fn from_loose(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "algorithms" => Some(Self::Algorithms),
            "system_design" => Some(Self::SystemDesign),
            "coding" => Some(Self::Coding),
            "conceptual" => Some(Self::Conceptual),
            "behavioral" => Some(Self::Behavioral),
            "case_study" => Some(Self::CaseStudy),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interview type supplied by the caller as generation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Technical,
    Behavioral,
    CaseStudy,
    /// Questions the candidate asks the employer.
    Reverse,
}

impl InterviewType {
    /// Returns the snake_case identifier for this interview type.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Behavioral => "behavioral",
            Self::CaseStudy => "case_study",
            Self::Reverse => "reverse",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate experience level supplied by the caller as generation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    /// Returns the snake_case identifier for this experience level.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Lead => "lead",
        }
    }

    /// The difficulty implied by this experience level.
    ///
    /// Used by both the context enricher and the default synthesizer.
    #[inline]
    pub const fn implied_difficulty(self) -> Difficulty {
        match self {
            Self::Junior => Difficulty::Easy,
            Self::Mid => Difficulty::Medium,
            Self::Senior | Self::Lead => Difficulty::Hard,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional caller-supplied context for a single generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationContext {
    pub interview_type: Option<InterviewType>,
    pub experience_level: Option<ExperienceLevel>,
}

impl GenerationContext {
    /// Creates a context with both tags set.
    #[inline]
    pub const fn new(interview_type: InterviewType, experience_level: ExperienceLevel) -> Self {
        Self {
            interview_type: Some(interview_type),
            experience_level: Some(experience_level),
        }
    }

    /// Returns true when neither context tag is present.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.interview_type.is_none() && self.experience_level.is_none()
    }
}

/// Tag identifying which extraction strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    JsonStructured,
    JsonSimple,
    MarkdownBlocks,
    TextNumbered,
    TextBulleted,
    TextParagraph,
    FallbackBasic,
    /// Canned output from the default synthesizer.
    Default,
}

impl ParseStrategy {
    /// Returns the stable identifier for this strategy.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JsonStructured => "json_structured",
            Self::JsonSimple => "json_simple",
            Self::MarkdownBlocks => "markdown_blocks",
            Self::TextNumbered => "text_numbered",
            Self::TextBulleted => "text_bulleted",
            Self::TextParagraph => "text_paragraph",
            Self::FallbackBasic => "fallback_basic",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed interview question with optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuestion {
    /// The question text.
    pub text: String,
    pub difficulty: Option<Difficulty>,
    pub category: Option<QuestionCategory>,
    /// Suggested answer time in minutes.
    pub time_estimate: Option<u32>,
    pub hints: Vec<String>,
    pub follow_ups: Vec<String>,
    /// Strategy-specific extras.
    pub metadata: BTreeMap<String, Value>,
}

impl ParsedQuestion {
    /// Creates a question with the given text and no metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            difficulty: None,
            category: None,
            time_estimate: None,
            hints: Vec::new(),
            follow_ups: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Complete output of one parse call.
///
/// Invariants: `questions` is non-empty whenever `success` is true;
/// `raw_questions` is parallel to `questions`; `error_message` is set exactly
/// when `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResult {
    pub questions: Vec<ParsedQuestion>,
    pub recommendations: Vec<String>,
    /// Plain question texts, parallel to `questions`, for consumers that
    /// predate the structured form.
    pub raw_questions: Vec<String>,
    pub strategy_used: ParseStrategy,
    pub success: bool,
    pub error_message: Option<String>,
    pub metadata: BTreeMap<String, Value>,
}

impl ParsedResult {
    /// Builds a candidate result from extracted parts.
    ///
    /// `raw_questions` is derived from `questions`, keeping the two lists
    /// parallel by construction.
    pub(crate) fn from_extraction(
        strategy: ParseStrategy,
        questions: Vec<ParsedQuestion>,
        recommendations: Vec<String>,
        metadata: BTreeMap<String, Value>,
    ) -> Self {
        let raw_questions = questions.iter().map(|q| q.text.clone()).collect();
        Self {
            questions,
            recommendations,
            raw_questions,
            strategy_used: strategy,
            success: true,
            error_message: None,
            metadata,
        }
    }
}
