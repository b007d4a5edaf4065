use super::completion::{CompletionRequest, CompletionService};
use super::error::GenerateError;
use super::prompt;
use super::types::{GenerateRequest, GenerateResponse, Turn};

pub static DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u16 = 2000;
pub static NO_CODE: &str = "// No code generated";

/// Handles one generation request at a time, holding no state between calls.
/// `service` is `None` when no credential was configured.
pub struct Generator<S> {
    service: Option<S>,
    model: String,
}

impl<S: CompletionService> Generator<S> {
    pub fn new(service: Option<S>, model: impl Into<String>) -> Generator<S> {
        Generator {
            service,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let Some(service) = &self.service else {
            tracing::error!("OpenAI API key not configured");
            return Err(GenerateError::ServiceMisconfigured);
        };

        tracing::debug!(
            prompt_len = request.prompt.len(),
            history_len = request.history.len(),
            "generating code"
        );

        let completion = service
            .complete(self.build_request(&request))
            .await
            .map_err(|err| {
                tracing::error!(kind = %err.kind(), "error generating code: {}", err.message());
                GenerateError::from(err)
            })?;

        let code = completion.first_content().unwrap_or(NO_CODE).to_owned();

        let GenerateRequest { prompt, mut history } = request;
        history.push(Turn::user(prompt::instruction(&prompt)));
        history.push(Turn::assistant(code.clone()));

        Ok(GenerateResponse {
            code,
            prompt,
            history,
        })
    }

    fn build_request(&self, request: &GenerateRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: prompt::assemble(&request.prompt, &request.history),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_core::completion::{Completion, CompletionError, ErrorKind};
    use crate::generate_core::types::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a canned outcome.
    struct FakeService {
        requests: Mutex<Vec<CompletionRequest>>,
        reply: fn() -> Result<Completion, CompletionError>,
    }

    impl FakeService {
        fn new(reply: fn() -> Result<Completion, CompletionError>) -> FakeService {
            FakeService {
                requests: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    #[async_trait]
    impl CompletionService for FakeService {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
            self.requests.lock().unwrap().push(request);
            (self.reply)()
        }
    }

    fn add_function() -> Result<Completion, CompletionError> {
        Ok(Completion::new(vec![Some("function add(a,b){return a+b;}".into())]))
    }

    #[tokio::test]
    async fn test_generate_add_two_numbers() {
        let generator = Generator::new(Some(FakeService::new(add_function)), DEFAULT_MODEL);
        let response = generator
            .generate(GenerateRequest::new("add two numbers", vec![]))
            .await
            .unwrap();

        assert_eq!(response.code, "function add(a,b){return a+b;}");
        assert_eq!(response.prompt, "add two numbers");
        assert_eq!(
            response.history,
            vec![
                Turn::user("Generate code for: add two numbers"),
                Turn::assistant("function add(a,b){return a+b;}"),
            ]
        );
    }

    #[tokio::test]
    async fn test_request_parameters_and_order() {
        let generator = Generator::new(Some(FakeService::new(add_function)), "test-model");
        let history = vec![Turn::user("a"), Turn::assistant("b"), Turn::user("c")];
        generator
            .generate(GenerateRequest::new("d", history.clone()))
            .await
            .unwrap();

        let requests = generator.service.as_ref().unwrap().requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.model, "test-model");
        assert_eq!(sent.temperature, TEMPERATURE);
        assert_eq!(sent.max_tokens, MAX_TOKENS);
        assert_eq!(sent.messages.len(), 1 + history.len() + 1);
        assert_eq!(sent.messages[0].role, Role::System);
        assert_eq!(sent.messages[1..4], history[..]);
        assert_eq!(sent.messages[4].content, "Generate code for: d");
    }

    #[tokio::test]
    async fn test_history_round_trip() {
        let generator = Generator::new(Some(FakeService::new(add_function)), DEFAULT_MODEL);
        let history = vec![Turn::user("x"), Turn::assistant("y")];
        let response = generator
            .generate(GenerateRequest::new("z", history.clone()))
            .await
            .unwrap();

        let mut expected = history;
        expected.push(Turn::user("Generate code for: z"));
        expected.push(Turn::assistant("function add(a,b){return a+b;}"));
        assert_eq!(response.history, expected);
        assert!(response.history.iter().all(|turn| turn.role != Role::System));
    }

    #[tokio::test]
    async fn test_empty_completion_uses_placeholder() {
        fn nothing() -> Result<Completion, CompletionError> {
            Ok(Completion::default())
        }
        let generator = Generator::new(Some(FakeService::new(nothing)), DEFAULT_MODEL);
        let response = generator
            .generate(GenerateRequest::new("x", vec![]))
            .await
            .unwrap();
        assert_eq!(response.code, NO_CODE);
        assert_eq!(response.history[1], Turn::assistant(NO_CODE));
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let generator: Generator<FakeService> = Generator::new(None, DEFAULT_MODEL);
        let err = generator
            .generate(GenerateRequest::new("x", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::ServiceMisconfigured));
    }

    #[tokio::test]
    async fn test_quota_failure() {
        fn quota() -> Result<Completion, CompletionError> {
            Err(CompletionError::new(ErrorKind::ExcessUsage, "You exceeded your current quota"))
        }
        let generator = Generator::new(Some(FakeService::new(quota)), DEFAULT_MODEL);
        let err = generator
            .generate(GenerateRequest::new("x", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::QuotaExceeded(_)));
        assert_eq!(err.to_string(), "OpenAI API quota exceeded");
    }
}
