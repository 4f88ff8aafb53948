//! Validation of user-submitted text.
//!
//! Rules are checked in a fixed order and the first failure wins:
//! 1. the value must be a JSON string,
//! 2. it must contain something other than whitespace,
//! 3. it must be at most [`MAX_SUBMISSION_CHARS`] characters long, counted
//!    before trimming.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

/// Upper bound on submission length, in Unicode scalar values.
pub const MAX_SUBMISSION_CHARS: usize = 280;

const BLANK: &str = "blank";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("text must be a string")]
    NotText,

    #[error("text must not be empty")]
    Empty,

    #[error("text must be at most {} characters", MAX_SUBMISSION_CHARS)]
    TooLong,
}

impl From<ValidationErrors> for SubmissionError {
    /// Blank text wins over length when both rules fail.
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let codes: Vec<&str> = field_errors
            .get("text")
            .map(|errs| errs.iter().map(|e| &*e.code).collect())
            .unwrap_or_default();
        if codes.contains(&BLANK) {
            SubmissionError::Empty
        } else {
            SubmissionError::TooLong
        }
    }
}

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new(BLANK));
    }
    Ok(())
}

/// Body of a submission request, as sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Submission {
    #[validate(
        custom(function = "not_blank"),
        length(max = 280)
    )]
    pub text: String,
}

impl Submission {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Check the rules and keep the trimmed text.
    pub fn validated(self) -> Result<SubmissionText, SubmissionError> {
        self.validate()?;
        Ok(SubmissionText(self.text.trim().to_owned()))
    }
}

/// Submission text that passed validation, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionText(String);

impl SubmissionText {
    /// Validate raw user input.
    pub fn parse(raw: &str) -> Result<Self, SubmissionError> {
        Submission::new(raw).validated()
    }

    /// Validate the `text` field of a request body, which may be missing or
    /// of any JSON type.
    pub fn from_json(value: Option<&Value>) -> Result<Self, SubmissionError> {
        match value {
            Some(Value::String(raw)) => Self::parse(raw),
            _ => Err(SubmissionError::NotText),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
