//! JSON payload strategies.
//!
//! Generations frequently wrap their JSON in markdown fences or prose, so
//! both strategies share [`locate_json`], which finds the payload before any
//! decoding happens.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::ExtractionStrategy;
use crate::{
    error::StrategyError,
    model::{Difficulty, ParseStrategy, ParsedQuestion, ParsedResult, QuestionCategory},
    patterns::PatternLibrary,
};

/// Locates a JSON payload embedded in surrounding text.
///
/// Search order: a fence explicitly tagged `json`, then any fence whose
/// trimmed body starts with `{` or `[`, then a balance scan from the first
/// opener in the raw text. The scan tracks string and escape state, so
/// braces inside quoted values do not unbalance it.
pub(crate) fn locate_json(input: &str, library: &PatternLibrary) -> Option<String> {
    for cap in library.code_fence.captures_iter(input) {
        let lang = cap.get(1).map_or("", |m| m.as_str());
        if lang.eq_ignore_ascii_case("json") {
            let body = cap.get(2)?.as_str().trim();
            if !body.is_empty() {
                return Some(body.to_string());
            }
        }
    }

    for cap in library.code_fence.captures_iter(input) {
        let body = cap.get(2).map_or("", |m| m.as_str().trim());
        if body.starts_with('{') || body.starts_with('[') {
            return Some(body.to_string());
        }
    }

    let brace = input.find('{');
    let bracket = input.find('[');
    let (start, open, close) = match (brace, bracket) {
        (Some(b), Some(k)) if b < k => (b, '{', '}'),
        (Some(b), None) => (b, '{', '}'),
        (_, Some(k)) => (k, '[', ']'),
        (None, None) => return None,
    };
    balanced_slice(input, start, open, close).map(str::to_string)
}

/// Returns the slice from `start` to the matching close symbol.
fn balanced_slice(input: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth: u32 = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (idx, ch) in input[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if ch == open && !in_string => depth += 1,
            _ if ch == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&input[start..start + idx + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Decodes a value that should be a list of strings, tolerating anything
/// else by producing an empty list. Non-string elements are skipped.
fn list_of_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// One element of a structured `questions` array: a full object or a plain
/// string, resolved at deserialization time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionEntry {
    Structured(QuestionObject),
    Plain(String),
}

#[derive(Debug, Deserialize)]
struct QuestionObject {
    question: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "estimated_time_minutes")]
    time_estimate: Option<u32>,
    #[serde(default)]
    hints: Vec<String>,
    #[serde(default, alias = "follow_up_questions")]
    follow_ups: Vec<String>,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct StructuredPayload {
    #[serde(default)]
    questions: Vec<QuestionEntry>,
    #[serde(default, deserialize_with = "list_of_strings")]
    recommendations: Vec<String>,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct SimplePayload {
    #[serde(default, deserialize_with = "list_of_strings")]
    questions: Vec<String>,
    #[serde(default, deserialize_with = "list_of_strings")]
    recommendations: Vec<String>,
}

/// Strategy for the full structured JSON shape.
///
/// Question entries may be objects or plain strings, but at least one entry
/// must be an object; an all-strings payload is the simple strategy's shape
/// and is declined here. Unknown difficulty/category spellings resolve to
/// absent, and a missing time estimate gets the library default.
///
/// # Examples
///
/// ```
/// use prepparse::parser::strategies::{ExtractionStrategy, JsonStructuredStrategy};
/// use prepparse::patterns::PatternLibrary;
///
/// let library = PatternLibrary::new();
/// let input = r#"{"questions": [{"question": "Explain database indexing.", "difficulty": "Medium"}]}"#;
/// let result = JsonStructuredStrategy.attempt(input, &library).unwrap();
/// assert_eq!(result.questions.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStructuredStrategy;

impl ExtractionStrategy for JsonStructuredStrategy {
    #[inline]
    fn strategy(&self) -> ParseStrategy {
        ParseStrategy::JsonStructured
    }

    #[inline]
    fn priority(&self) -> u8 {
        1
    }

    fn attempt(
        &self,
        input: &str,
        library: &PatternLibrary,
    ) -> Result<ParsedResult, StrategyError> {
        let payload =
            locate_json(input, library).ok_or(StrategyError::not_applicable("JSON payload"))?;
        let decoded: StructuredPayload = serde_json::from_str(&payload)?;

        if !decoded
            .questions
            .iter()
            .any(|entry| matches!(entry, QuestionEntry::Structured(_)))
        {
            return Err(StrategyError::not_applicable("structured question objects"));
        }

        let mut questions = Vec::new();
        for entry in decoded.questions {
            match entry {
                QuestionEntry::Structured(obj) => {
                    let text = obj.question.trim().to_string();
                    if text.is_empty() {
                        continue;
                    }
                    let mut question = ParsedQuestion::new(text);
                    question.difficulty =
                        obj.difficulty.as_deref().and_then(Difficulty::from_loose);
                    question.category =
                        obj.category.as_deref().and_then(QuestionCategory::from_loose);
                    question.time_estimate =
                        Some(obj.time_estimate.unwrap_or(library.default_time_estimate));
                    question.hints = obj.hints;
                    question.follow_ups = obj.follow_ups;
                    question.metadata = obj.metadata;
                    questions.push(question);
                }
                QuestionEntry::Plain(text) => {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        questions.push(ParsedQuestion::new(text));
                    }
                }
            }
        }

        if questions.is_empty() {
            return Err(StrategyError::Empty);
        }

        Ok(ParsedResult::from_extraction(
            ParseStrategy::JsonStructured,
            questions,
            decoded.recommendations,
            decoded.metadata,
        ))
    }
}

/// Strategy for the reduced JSON shape: arrays of plain strings.
///
/// # Examples
///
/// ```
/// use prepparse::parser::strategies::{ExtractionStrategy, JsonSimpleStrategy};
/// use prepparse::patterns::PatternLibrary;
///
/// let library = PatternLibrary::new();
/// let input = r#"{"questions": ["What is a deadlock and how do you avoid one?"]}"#;
/// let result = JsonSimpleStrategy.attempt(input, &library).unwrap();
/// assert_eq!(result.raw_questions.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSimpleStrategy;

impl ExtractionStrategy for JsonSimpleStrategy {
    #[inline]
    fn strategy(&self) -> ParseStrategy {
        ParseStrategy::JsonSimple
    }

    #[inline]
    fn priority(&self) -> u8 {
        2
    }

    fn attempt(
        &self,
        input: &str,
        library: &PatternLibrary,
    ) -> Result<ParsedResult, StrategyError> {
        let payload =
            locate_json(input, library).ok_or(StrategyError::not_applicable("JSON payload"))?;
        let decoded: SimplePayload = serde_json::from_str(&payload)?;

        let questions: Vec<ParsedQuestion> = decoded
            .questions
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(ParsedQuestion::new)
            .collect();

        if questions.is_empty() {
            return Err(StrategyError::Empty);
        }

        Ok(ParsedResult::from_extraction(
            ParseStrategy::JsonSimple,
            questions,
            decoded.recommendations,
            BTreeMap::new(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PatternLibrary {
        PatternLibrary::new()
    }

    #[test]
    fn test_locate_json_tagged_fence() {
        let input = "Here you go:\n```json\n{\"questions\": []}\n```\nGood luck!";
        assert_eq!(
            locate_json(input, &library()),
            Some(r#"{"questions": []}"#.to_string())
        );
    }

    #[test]
    fn test_locate_json_untagged_fence() {
        let input = "```\n[1, 2, 3]\n```";
        assert_eq!(locate_json(input, &library()), Some("[1, 2, 3]".to_string()));
    }

    #[test]
    fn test_locate_json_fence_wins_over_scan() {
        let input = "Ignore {this} prose.\n```json\n{\"a\": 1}\n```";
        assert_eq!(locate_json(input, &library()), Some(r#"{"a": 1}"#.to_string()));
    }

    #[test]
    fn test_locate_json_balance_scan_in_prose() {
        let input = r#"Sure! Here's the data: {"a": {"b": 2}} hope that helps."#;
        assert_eq!(
            locate_json(input, &library()),
            Some(r#"{"a": {"b": 2}}"#.to_string())
        );
    }

    #[test]
    fn test_balance_scan_ignores_braces_in_strings() {
        let input = r#"Data: {"text": "use {braces} freely", "n": 1} end"#;
        assert_eq!(
            locate_json(input, &library()),
            Some(r#"{"text": "use {braces} freely", "n": 1}"#.to_string())
        );
    }

    #[test]
    fn test_balance_scan_handles_escaped_quotes() {
        let input = r#"{"text": "she said \"hi {\" ok", "n": 1}"#;
        assert_eq!(locate_json(input, &library()), Some(input.to_string()));
    }

    #[test]
    fn test_locate_json_prefers_earlier_opener() {
        let input = r#"List: [1, 2] and object: {"a": 1}"#;
        assert_eq!(locate_json(input, &library()), Some("[1, 2]".to_string()));
    }

    #[test]
    fn test_locate_json_none() {
        assert_eq!(locate_json("no payload here", &library()), None);
    }

    #[test]
    fn test_structured_full_objects() {
        let input = r#"{
            "questions": [
                {
                    "question": "Design a URL shortener.",
                    "difficulty": "HARD",
                    "category": "System Design",
                    "time_estimate": 25,
                    "hints": ["start with the data model"],
                    "follow_ups": ["How would you handle hot keys?"]
                }
            ],
            "recommendations": ["Review distributed systems."],
            "metadata": {"model": "gpt-4o"}
        }"#;

        let result = JsonStructuredStrategy.attempt(input, &library()).unwrap();
        assert_eq!(result.questions.len(), 1);
        let q = &result.questions[0];
        assert_eq!(q.text, "Design a URL shortener.");
        assert_eq!(q.difficulty, Some(Difficulty::Hard));
        assert_eq!(q.category, Some(QuestionCategory::SystemDesign));
        assert_eq!(q.time_estimate, Some(25));
        assert_eq!(q.hints.len(), 1);
        assert_eq!(q.follow_ups.len(), 1);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.metadata["model"], "gpt-4o");
    }

    #[test]
    fn test_structured_field_aliases() {
        let input = r#"{"questions": [{
            "question": "Explain consistent hashing.",
            "estimated_time_minutes": 15,
            "follow_up_questions": ["Where is it used?"]
        }]}"#;

        let result = JsonStructuredStrategy.attempt(input, &library()).unwrap();
        assert_eq!(result.questions[0].time_estimate, Some(15));
        assert_eq!(result.questions[0].follow_ups, vec!["Where is it used?"]);
    }

    #[test]
    fn test_structured_defaults_and_unknown_enums() {
        let input = r#"{"questions": [{
            "question": "Explain optimistic locking.",
            "difficulty": "impossible",
            "category": "trivia"
        }]}"#;

        let result = JsonStructuredStrategy.attempt(input, &library()).unwrap();
        let q = &result.questions[0];
        assert_eq!(q.difficulty, None);
        assert_eq!(q.category, None);
        assert_eq!(q.time_estimate, Some(10));
    }

    #[test]
    fn test_structured_declines_all_strings() {
        let input = r#"{"questions": ["Explain the CAP theorem?"]}"#;
        let err = JsonStructuredStrategy.attempt(input, &library()).unwrap_err();
        assert!(matches!(err, StrategyError::NotApplicable { .. }));
    }

    #[test]
    fn test_structured_accepts_mixed_entries() {
        let input = r#"{"questions": [
            {"question": "Explain write-ahead logging."},
            "What is a quorum read?"
        ]}"#;

        let result = JsonStructuredStrategy.attempt(input, &library()).unwrap();
        assert_eq!(result.questions.len(), 2);
        assert_eq!(result.raw_questions[1], "What is a quorum read?");
    }

    #[test]
    fn test_structured_skips_empty_question_text() {
        let input = r#"{"questions": [
            {"question": "   "},
            {"question": "Explain memory-mapped files."}
        ]}"#;

        let result = JsonStructuredStrategy.attempt(input, &library()).unwrap();
        assert_eq!(result.questions.len(), 1);
    }

    #[test]
    fn test_structured_decode_failure() {
        let input = "```json\n{not valid json}\n```";
        let err = JsonStructuredStrategy.attempt(input, &library()).unwrap_err();
        assert!(matches!(err, StrategyError::Decode(_)));
    }

    #[test]
    fn test_simple_payload() {
        let input = r#"{"questions": ["What is sharding and when is it needed?"],
                        "recommendations": ["Practice estimation questions"]}"#;

        let result = JsonSimpleStrategy.attempt(input, &library()).unwrap();
        assert_eq!(result.questions.len(), 1);
        assert_eq!(result.questions[0].time_estimate, None);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_simple_tolerates_non_list_recommendations() {
        let input = r#"{"questions": ["Describe a blue-green deployment."],
                        "recommendations": "not a list"}"#;

        let result = JsonSimpleStrategy.attempt(input, &library()).unwrap();
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_simple_empty_questions() {
        let input = r#"{"questions": []}"#;
        let err = JsonSimpleStrategy.attempt(input, &library()).unwrap_err();
        assert!(matches!(err, StrategyError::Empty));
    }

    #[test]
    fn test_no_payload_at_all() {
        let err = JsonSimpleStrategy
            .attempt("plain prose, nothing else", &library())
            .unwrap_err();
        assert!(matches!(err, StrategyError::NotApplicable { .. }));
    }
}
