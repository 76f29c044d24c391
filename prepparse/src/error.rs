//! Error types for the extraction cascade.
//!
//! These errors never cross the public boundary: a strategy failing is
//! normal cascade behavior, and the dispatcher folds every failure into
//! `ParsedResult::error_message` when the whole cascade is exhausted.

/// Errors a single extraction strategy can report.
///
/// Each variant means "this strategy could not produce a candidate" — the
/// dispatcher records the detail and moves on to the next strategy.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The input contains nothing this strategy recognizes.
    #[error("no {shape} found in response")]
    NotApplicable {
        /// Human-readable description of the shape the strategy looks for.
        shape: &'static str,
    },

    /// A located JSON payload failed to decode.
    #[error("JSON decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The strategy ran over the input but produced no usable questions.
    #[error("no questions extracted")]
    Empty,
}

impl StrategyError {
    /// Creates a `NotApplicable` error for the given shape description.
    #[inline]
    pub const fn not_applicable(shape: &'static str) -> Self {
        Self::NotApplicable { shape }
    }
}

/// Reasons the validator rejects a candidate result.
///
/// A rejection sends the dispatcher on to the next strategy, exactly like a
/// [`StrategyError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The candidate contains no questions at all.
    #[error("candidate contains no questions")]
    NoQuestions,

    /// A question's text length falls outside the accepted bounds.
    #[error("question {index} has length {length}, outside {min}..={max}")]
    LengthOutOfBounds {
        /// Zero-based index of the offending question.
        index: usize,
        /// Character count of the question text.
        length: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_applicable_display() {
        let err = StrategyError::not_applicable("question header blocks");
        assert_eq!(
            err.to_string(),
            "no question header blocks found in response"
        );
    }

    #[test]
    fn test_decode_from_serde() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: StrategyError = json_err.into();
        assert!(matches!(err, StrategyError::Decode(_)));
    }

    #[test]
    fn test_validation_display() {
        let err = ValidationError::LengthOutOfBounds {
            index: 2,
            length: 7,
            min: 10,
            max: 500,
        };
        assert!(err.to_string().contains("length 7"));
        assert!(err.to_string().contains("10..=500"));
    }
}
