//! The pattern library: every tunable the extraction cascade uses.
//!
//! One immutable [`PatternLibrary`] value holds the length thresholds,
//! compiled regexes, keyword sets, and canned default content shared by the
//! strategies, the validator, the enricher, and the default synthesizer.
//! It is constructed once and passed by reference; nothing in it is ever
//! mutated.

use regex::Regex;

use crate::model::InterviewType;

/// Which list a section header routes subsequent lines into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Questions,
    Recommendations,
}

/// Keywords that mark a section header as question-related.
const QUESTION_KEYWORDS: &[&str] = &["question", "interview", "ask", "queries", "topics"];

/// Keywords that mark content as a recommendation.
const RECOMMENDATION_KEYWORDS: &[&str] = &[
    "recommend", "suggest", "tip", "advice", "prepare", "practice", "review", "study", "focus",
    "consider",
];

/// Lead phrases that mark a sentence as a question.
const QUESTION_STARTERS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can you", "could you", "would you",
    "have you", "do you", "is there", "are there", "describe", "explain", "tell me",
];

const ALGORITHM_KEYWORDS: &[&str] = &["algorithm", "complexity", "sort", "search"];
const SYSTEM_DESIGN_KEYWORDS: &[&str] = &["design", "architecture", "scale", "system"];
const CODING_KEYWORDS: &[&str] = &["code", "implement", "write", "function"];

const DEFAULT_TECHNICAL_QUESTIONS: [&str; 5] = [
    "Can you describe your experience with the technologies mentioned in the job description?",
    "How do you approach debugging complex issues in production?",
    "What's your experience with system design and architecture?",
    "Can you walk me through a challenging technical problem you solved?",
    "How do you stay updated with new technologies and best practices?",
];

const DEFAULT_BEHAVIORAL_QUESTIONS: [&str; 5] = [
    "Tell me about yourself and your background",
    "Why are you interested in this position?",
    "Describe a time when you had to work with a difficult team member",
    "How do you handle tight deadlines and pressure?",
    "What are your greatest strengths and areas for improvement?",
];

const DEFAULT_CASE_STUDY_QUESTIONS: [&str; 5] = [
    "How would you approach analyzing this business problem?",
    "What key metrics would you use to measure success?",
    "What are the main risks and how would you mitigate them?",
    "How would you prioritize different solutions?",
    "What would be your implementation timeline?",
];

const DEFAULT_REVERSE_QUESTIONS: [&str; 5] = [
    "What are the biggest challenges facing the team right now?",
    "How would you describe the team culture?",
    "What are the opportunities for growth and learning?",
    "What does success look like in this role?",
    "What's the typical career progression for this position?",
];

const DEFAULT_RECOMMENDATIONS: [&str; 5] = [
    "Review the job description and align your responses with key requirements",
    "Prepare specific examples from your past experience",
    "Research the company's recent news and initiatives",
    "Practice your responses out loud to improve delivery",
    "Prepare thoughtful questions to ask the interviewer",
];

/// Read-only configuration for the extraction cascade.
///
/// # Examples
///
/// ```
/// use prepparse::patterns::PatternLibrary;
///
/// let library = PatternLibrary::new();
/// assert!(library.looks_like_question("Explain the borrow checker"));
/// assert!(library.is_recommendation("Practice whiteboard coding daily"));
/// ```
#[derive(Debug)]
pub struct PatternLibrary {
    /// Inclusive lower bound on question text length, in chars.
    pub min_question_len: usize,
    /// Inclusive upper bound on question text length, in chars.
    pub max_question_len: usize,
    /// Lines at or above this length are never section headers.
    pub section_header_max_len: usize,
    /// Default per-question time estimate, in minutes.
    pub default_time_estimate: u32,
    /// Cap on questions the basic fallback accepts without question markers.
    pub max_fallback_questions: usize,
    /// Below this count the markdown-block strategy runs its numbered sweep.
    pub min_block_questions: usize,

    /// Markdown code fence with optional language tag.
    pub code_fence: Regex,
    /// Numbered list line: `1.` or `1)` followed by content.
    pub numbered_line: Regex,
    /// Bulleted list line: `•`, `-`, or `*` followed by content.
    pub bulleted_line: Regex,
    /// Question-block header patterns, tried in order.
    pub question_headers: Vec<Regex>,
    /// Lines that seal an open question block.
    pub metadata_line: Regex,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLibrary {
    /// Compiles the built-in pattern set.
    ///
    /// The patterns are literals; a compile failure is a bug in this module,
    /// so it panics rather than returning an error.
    pub fn new() -> Self {
        Self {
            min_question_len: 10,
            max_question_len: 500,
            section_header_max_len: 30,
            default_time_estimate: 10,
            max_fallback_questions: 5,
            min_block_questions: 2,
            code_fence: Regex::new(r"(?s)```(\w*)\n(.*?)```").expect("code fence pattern"),
            numbered_line: Regex::new(r"^\d+[.)]\s*(.+)$").expect("numbered line pattern"),
            bulleted_line: Regex::new(r"^[•\-*]\s*(.+)$").expect("bulleted line pattern"),
            question_headers: vec![
                Regex::new(r"^\d+[.)]\s*\*\*Question\s*\d*:?\s*([^*]+)\*\*")
                    .expect("ordinal question header pattern"),
                // Quoted form before the generic bold form, so the quote
                // capture is not shadowed by the looser pattern.
                Regex::new(r#"^\*\*Question:\*\*\s*"([^"]+)""#).expect("quoted question pattern"),
                Regex::new(r"^\*\*Question\s*\d*:?\s*([^*]+)\*\*")
                    .expect("bold question header pattern"),
                Regex::new(r"^\d+[.)]\s*\*\*([^*]+)\*\*").expect("ordinal bold title pattern"),
            ],
            metadata_line: Regex::new(
                r"(?i)^(?:-\s*\*\*|\*\*\s*(?:assessment|what it tests)|\*\s*(?:rationale|skills required))",
            )
            .expect("metadata line pattern"),
        }
    }

    /// Checks whether a line is a section header.
    ///
    /// Headers are short lines that end with a colon or mention a
    /// question/recommendation keyword.
    pub fn is_section_header(&self, line: &str) -> bool {
        if line.chars().count() >= self.section_header_max_len {
            return false;
        }
        let lower = line.to_lowercase();
        line.ends_with(':')
            || QUESTION_KEYWORDS.iter().any(|kw| lower.contains(kw))
            || RECOMMENDATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }

    /// Classifies a section header by keyword.
    ///
    /// Returns `None` for headers that name neither domain, in which case the
    /// current section is left unchanged.
    pub fn classify_header(&self, line: &str) -> Option<Section> {
        let lower = line.to_lowercase();
        if QUESTION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            Some(Section::Questions)
        } else if RECOMMENDATION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            Some(Section::Recommendations)
        } else {
            None
        }
    }

    /// Checks whether text reads as a recommendation.
    pub fn is_recommendation(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        RECOMMENDATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }

    /// Checks whether text starts with an interrogative lead phrase.
    pub fn looks_like_question(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        QUESTION_STARTERS
            .iter()
            .any(|starter| lower.starts_with(starter))
    }

    /// Matches a line against the question-block header patterns.
    ///
    /// Returns the captured title, trimmed of stray leading colons.
    pub fn match_question_header(&self, line: &str) -> Option<String> {
        for pattern in &self.question_headers {
            if let Some(captures) = pattern.captures(line) {
                let title = captures.get(1)?.as_str();
                return Some(title.trim_start_matches(':').trim().to_string());
            }
        }
        None
    }

    /// Infers a technical sub-category from question text.
    ///
    /// Falls through algorithms, system design, and coding keyword groups;
    /// anything else is conceptual.
    pub fn infer_technical_category(
        &self,
        text: &str,
    ) -> crate::model::QuestionCategory {
        use crate::model::QuestionCategory;

        let lower = text.to_lowercase();
        if ALGORITHM_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            QuestionCategory::Algorithms
        } else if SYSTEM_DESIGN_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            QuestionCategory::SystemDesign
        } else if CODING_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            QuestionCategory::Coding
        } else {
            QuestionCategory::Conceptual
        }
    }

    /// Canned question set for an interview type.
    ///
    /// With no type, mixes the first three technical and first two behavioral
    /// questions.
    pub fn default_questions(&self, interview_type: Option<InterviewType>) -> Vec<&'static str> {
        match interview_type {
            Some(InterviewType::Technical) => DEFAULT_TECHNICAL_QUESTIONS.to_vec(),
            Some(InterviewType::Behavioral) => DEFAULT_BEHAVIORAL_QUESTIONS.to_vec(),
            Some(InterviewType::CaseStudy) => DEFAULT_CASE_STUDY_QUESTIONS.to_vec(),
            Some(InterviewType::Reverse) => DEFAULT_REVERSE_QUESTIONS.to_vec(),
            None => DEFAULT_TECHNICAL_QUESTIONS[..3]
                .iter()
                .chain(&DEFAULT_BEHAVIORAL_QUESTIONS[..2])
                .copied()
                .collect(),
        }
    }

    /// Canned recommendation set.
    pub fn default_recommendations(&self) -> Vec<String> {
        DEFAULT_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
    }
}

/// Removes markdown emphasis markers from extracted content.
pub fn strip_emphasis(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionCategory;

    #[test]
    fn test_section_header_detection() {
        let library = PatternLibrary::new();

        assert!(library.is_section_header("Tips:"));
        assert!(library.is_section_header("Interview Questions"));
        assert!(library.is_section_header("Recommended preparation"));
        // Long lines are content, whatever they mention.
        assert!(!library.is_section_header(
            "3. Explain how you would design a rate limiter for a public API"
        ));
        assert!(!library.is_section_header("Just a plain sentence"));
    }

    #[test]
    fn test_classify_header() {
        let library = PatternLibrary::new();

        assert_eq!(
            library.classify_header("Interview Questions:"),
            Some(Section::Questions)
        );
        assert_eq!(
            library.classify_header("Tips:"),
            Some(Section::Recommendations)
        );
        assert_eq!(library.classify_header("Here we go:"), None);
    }

    #[test]
    fn test_looks_like_question() {
        let library = PatternLibrary::new();

        assert!(library.looks_like_question("What is polymorphism"));
        assert!(library.looks_like_question("can you explain closures"));
        assert!(library.looks_like_question("Describe your deployment process"));
        assert!(!library.looks_like_question("The system uses a queue"));
    }

    #[test]
    fn test_match_question_header_forms() {
        let library = PatternLibrary::new();

        assert_eq!(
            library.match_question_header("1. **Question 1: Caching strategies**"),
            Some("Caching strategies".to_string())
        );
        assert_eq!(
            library.match_question_header(r#"**Question:** "How do indexes work?""#),
            Some("How do indexes work?".to_string())
        );
        assert_eq!(
            library.match_question_header("**Question 3: Sharding**"),
            Some("Sharding".to_string())
        );
        assert_eq!(
            library.match_question_header("2) **Consistency models**"),
            Some("Consistency models".to_string())
        );
        assert_eq!(library.match_question_header("1. A plain numbered line"), None);
    }

    #[test]
    fn test_metadata_line() {
        let library = PatternLibrary::new();

        assert!(library.metadata_line.is_match("- **Difficulty:** hard"));
        assert!(library.metadata_line.is_match("**Assessment:** rubric"));
        assert!(library.metadata_line.is_match("**What it tests:** recursion"));
        assert!(library.metadata_line.is_match("*Rationale:* checks depth"));
        assert!(library.metadata_line.is_match("*Skills required:* SQL"));
        // Dash plus italic label is block content, not metadata.
        assert!(!library.metadata_line.is_match("- *Scenario:* a service is down"));
        assert!(!library.metadata_line.is_match("plain continuation text"));
    }

    #[test]
    fn test_infer_technical_category() {
        let library = PatternLibrary::new();

        assert_eq!(
            library.infer_technical_category("Explain sorting complexity trade-offs"),
            QuestionCategory::Algorithms
        );
        assert_eq!(
            library.infer_technical_category("How would you scale this service"),
            QuestionCategory::SystemDesign
        );
        assert_eq!(
            library.infer_technical_category("Write a function that reverses a list"),
            QuestionCategory::Coding
        );
        assert_eq!(
            library.infer_technical_category("What is a race condition"),
            QuestionCategory::Conceptual
        );
    }

    #[test]
    fn test_default_question_sets() {
        let library = PatternLibrary::new();

        for interview_type in [
            Some(InterviewType::Technical),
            Some(InterviewType::Behavioral),
            Some(InterviewType::CaseStudy),
            Some(InterviewType::Reverse),
            None,
        ] {
            let questions = library.default_questions(interview_type);
            assert_eq!(questions.len(), 5);
            for q in &questions {
                let len = q.chars().count();
                assert!(len >= library.min_question_len && len <= library.max_question_len);
            }
        }
        assert_eq!(library.default_recommendations().len(), 5);
    }

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(strip_emphasis("**bold** and *italic*"), "bold and italic");
        assert_eq!(strip_emphasis("  plain  "), "plain");
    }
}
