//! Question and answer models matching the frontend Question interface.

use serde::{Deserialize, Serialize};

/// Minimum length of a question after trimming, in characters.
pub const QUESTION_MIN_CHARS: usize = 10;
/// Maximum length of a question after trimming, in characters.
pub const QUESTION_MAX_CHARS: usize = 500;
/// Minimum length of an answer after trimming, in characters.
pub const ANSWER_MIN_CHARS: usize = 20;

/// A moderator-authored response embedded in a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    pub author: String,
    pub timestamp: String,
}

/// A user-submitted question, possibly anonymous.
///
/// `author` is never serialized for anonymous questions; `is_answered`
/// is derived from the presence of an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub timestamp: String,
    pub is_answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
}

/// Request body for asking a new question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskQuestionRequest {
    pub text: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Request body for answering a question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerQuestionRequest {
    pub text: String,
}

/// Request body for reporting a question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContentRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Validate question text against the length rules. Returns the trimmed text.
pub fn validate_question_text(text: &str) -> Result<&str, String> {
    let trimmed = text.trim();
    let chars = trimmed.chars().count();
    if chars < QUESTION_MIN_CHARS {
        return Err(format!(
            "Question must be at least {} characters",
            QUESTION_MIN_CHARS
        ));
    }
    if chars > QUESTION_MAX_CHARS {
        return Err(format!(
            "Question must be at most {} characters",
            QUESTION_MAX_CHARS
        ));
    }
    Ok(trimmed)
}

/// Validate answer text against the length rule. Returns the trimmed text.
pub fn validate_answer_text(text: &str) -> Result<&str, String> {
    let trimmed = text.trim();
    if trimmed.chars().count() < ANSWER_MIN_CHARS {
        return Err(format!(
            "Answer must be at least {} characters",
            ANSWER_MIN_CHARS
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_too_short() {
        assert!(validate_question_text("short").is_err());
        assert!(validate_question_text("   padded  ").is_err());
    }

    #[test]
    fn test_question_bounds() {
        let min = "a".repeat(QUESTION_MIN_CHARS);
        assert_eq!(validate_question_text(&min), Ok(min.as_str()));

        let max = "a".repeat(QUESTION_MAX_CHARS);
        assert!(validate_question_text(&max).is_ok());

        let too_long = "a".repeat(QUESTION_MAX_CHARS + 1);
        assert!(validate_question_text(&too_long).is_err());
    }

    #[test]
    fn test_question_trimmed_before_counting() {
        // 9 characters plus surrounding whitespace is still too short
        let text = format!("  {}  ", "a".repeat(9));
        assert!(validate_question_text(&text).is_err());

        let text = format!("  {}  ", "a".repeat(10));
        assert!(validate_question_text(&text).is_ok());
    }

    #[test]
    fn test_question_counts_chars_not_bytes() {
        // Multibyte characters count once each
        let text = "ä".repeat(QUESTION_MIN_CHARS);
        assert!(validate_question_text(&text).is_ok());
    }

    #[test]
    fn test_answer_min_length() {
        assert!(validate_answer_text("too short").is_err());
        let ok = "a".repeat(ANSWER_MIN_CHARS);
        assert_eq!(validate_answer_text(&ok), Ok(ok.as_str()));
    }

    #[test]
    fn test_anonymous_question_omits_author() {
        let question = Question {
            id: 1,
            text: "How do I handle a difficult roommate?".to_string(),
            is_anonymous: true,
            author: None,
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
            is_answered: false,
            answer: None,
        };
        let json = serde_json::to_value(&question).unwrap();
        assert!(json.get("author").is_none());
        assert!(json.get("answer").is_none());
        assert_eq!(json["isAnonymous"], true);
    }
}
