use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::GenerateError;
use super::prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Turn {
        Turn {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Turn {
        Turn::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Turn {
        Turn::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub history: Vec<Turn>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, history: Vec<Turn>) -> GenerateRequest {
        GenerateRequest {
            prompt: prompt.into(),
            history,
        }
    }

    /// Parses a raw request body. Anything that is not a JSON object with a
    /// non-empty string `prompt` is rejected; `history` is filtered, never
    /// rejected.
    pub fn from_slice(body: &[u8]) -> Result<GenerateRequest, GenerateError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| GenerateError::InvalidRequest)?;
        GenerateRequest::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<GenerateRequest, GenerateError> {
        let prompt = value
            .get("prompt")
            .and_then(Value::as_str)
            .filter(|prompt| !prompt.is_empty())
            .ok_or(GenerateError::InvalidRequest)?;
        let history = value
            .get("history")
            .map(prompt::filter_history)
            .unwrap_or_default();
        Ok(GenerateRequest::new(prompt, history))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<Turn>,
}
