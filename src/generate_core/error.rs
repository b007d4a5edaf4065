use super::completion::{CompletionError, ErrorKind};

/// Failures of a single generation request. The display text is what the
/// caller gets to see, so it never carries provider details.
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("Prompt is required")]
    InvalidRequest,

    #[error("OpenAI API key not configured")]
    ServiceMisconfigured,

    #[error("Invalid OpenAI API key")]
    CredentialRejected(#[source] CompletionError),

    #[error("OpenAI API quota exceeded")]
    QuotaExceeded(#[source] CompletionError),

    #[error("Failed to generate code!")]
    Unclassified(#[source] CompletionError),
}

impl From<CompletionError> for GenerateError {
    fn from(err: CompletionError) -> Self {
        match err.kind() {
            ErrorKind::Authentication => GenerateError::CredentialRejected(err),
            ErrorKind::ExcessUsage => GenerateError::QuotaExceeded(err),
            ErrorKind::Other => GenerateError::Unclassified(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_selects_category() {
        let err = GenerateError::from(CompletionError::new(ErrorKind::Authentication, "bad key"));
        assert!(matches!(err, GenerateError::CredentialRejected(_)));

        let err = GenerateError::from(CompletionError::new(ErrorKind::ExcessUsage, "slow down"));
        assert!(matches!(err, GenerateError::QuotaExceeded(_)));

        let err = GenerateError::from(CompletionError::new(ErrorKind::Other, "boom"));
        assert!(matches!(err, GenerateError::Unclassified(_)));
    }

    #[test]
    fn test_messages_hide_provider_detail() {
        let err = GenerateError::from(CompletionError::new(
            ErrorKind::Other,
            "upstream connect error at 10.0.0.3",
        ));
        assert_eq!(err.to_string(), "Failed to generate code!");
    }
}
