use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{self as openai_types},
    Client,
};
use async_trait::async_trait;

use super::completion::{Completion, CompletionError, CompletionRequest, CompletionService, ErrorKind};
use super::types::{Role, Turn};

type Model = openai_types::CreateChatCompletionRequest;
type Message = openai_types::ChatCompletionRequestMessage;
type ModelArgs = openai_types::CreateChatCompletionRequestArgs;
type MessageArgs = openai_types::ChatCompletionRequestMessageArgs;

impl From<Role> for openai_types::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::System => openai_types::Role::System,
            Role::User => openai_types::Role::User,
            Role::Assistant => openai_types::Role::Assistant,
        }
    }
}

/// Chat completions against the OpenAI API (or any server speaking its
/// protocol when `api_base` is set).
pub struct OpenAiService {
    client: Client<OpenAIConfig>,
}

impl OpenAiService {
    pub fn new(api_key: &str, api_base: Option<&str>) -> OpenAiService {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }
        OpenAiService {
            client: Client::with_config(config),
        }
    }
}

fn build_messages(turns: &[Turn]) -> Result<Vec<Message>, OpenAIError> {
    turns
        .iter()
        .map(|turn| {
            MessageArgs::default()
                .role(turn.role)
                .content(turn.content.as_str())
                .build()
        })
        .collect()
}

fn build_model(request: &CompletionRequest) -> Result<Model, OpenAIError> {
    ModelArgs::default()
        .model(request.model.as_str())
        .messages(build_messages(&request.messages)?)
        .temperature(request.temperature)
        .max_tokens(request.max_tokens)
        .build()
}

/// The provider reports failures as free text, so the error kind is
/// recovered from the message.
fn classify(err: OpenAIError) -> CompletionError {
    match err {
        OpenAIError::ApiError(api_error) => CompletionError::from_message(api_error.message),
        other => CompletionError::new(ErrorKind::Other, other.to_string()),
    }
}

#[async_trait]
impl CompletionService for OpenAiService {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let model = build_model(&request).map_err(classify)?;
        let response = self.client.chat().create(model).await.map_err(classify)?;
        let choices = response
            .choices
            .into_iter()
            .map(|choice| choice.message.content)
            .collect();
        Ok(Completion::new(choices))
    }
}
