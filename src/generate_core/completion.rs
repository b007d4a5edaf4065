//! The seam between the generator and a hosted chat-completion API.
//!
//! A [`CompletionService`] maps an ordered list of [`Turn`]s to the text of
//! one or more candidate completions. Failures carry an [`ErrorKind`] so the
//! caller can react to the category of the failure without inspecting
//! provider-specific wording.

use async_trait::async_trait;
use std::fmt;

use super::types::Turn;

/// General categories of failures reported by a [`CompletionService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential was missing, malformed or rejected by the provider.
    Authentication,
    /// A rate limit was reached or a usage quota was exceeded.
    ExcessUsage,
    /// Anything else: transport failures, malformed responses, provider errors.
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Authentication => write!(f, "authentication"),
            ErrorKind::ExcessUsage => write!(f, "excess usage"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{kind} error: {message}")]
pub struct CompletionError {
    kind: ErrorKind,
    message: String,
}

impl CompletionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> CompletionError {
        CompletionError {
            kind,
            message: message.into(),
        }
    }

    /// Classifies a free-text provider message. Only meant for adapters whose
    /// provider does not report a structured error code.
    pub fn from_message(message: impl Into<String>) -> CompletionError {
        let message = message.into();
        let lowered = message.to_lowercase();
        let kind = if lowered.contains("api key") {
            ErrorKind::Authentication
        } else if lowered.contains("quota") || lowered.contains("rate limit") {
            ErrorKind::ExcessUsage
        } else {
            ErrorKind::Other
        };
        CompletionError::new(kind, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f32,
    pub max_tokens: u16,
}

/// Candidate completions in the order the provider returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub choices: Vec<Option<String>>,
}

impl Completion {
    pub fn new(choices: Vec<Option<String>>) -> Completion {
        Completion { choices }
    }

    /// Text of the first choice, if the provider produced any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.as_deref())
            .filter(|content| !content.is_empty())
    }
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_credential_messages() {
        for message in [
            "Incorrect API key provided: sk-****. You can find your API key at ...",
            "You didn't provide an API key.",
        ] {
            assert_eq!(
                CompletionError::from_message(message).kind(),
                ErrorKind::Authentication
            );
        }
    }

    #[test]
    fn test_classify_usage_messages() {
        for message in [
            "You exceeded your current quota, please check your plan and billing details.",
            "Rate limit reached for gpt-4o-mini in organization org-x on requests per min.",
        ] {
            assert_eq!(
                CompletionError::from_message(message).kind(),
                ErrorKind::ExcessUsage
            );
        }
    }

    #[test]
    fn test_classify_everything_else() {
        let err = CompletionError::from_message("The server had an error while processing your request.");
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(
            err.message(),
            "The server had an error while processing your request."
        );
    }

    #[test]
    fn test_first_content() {
        assert_eq!(Completion::default().first_content(), None);
        assert_eq!(Completion::new(vec![None]).first_content(), None);
        assert_eq!(Completion::new(vec![Some(String::new())]).first_content(), None);
        assert_eq!(
            Completion::new(vec![Some("a".into()), Some("b".into())]).first_content(),
            Some("a")
        );
    }
}
