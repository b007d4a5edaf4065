mod error;
mod generator;
mod openai;
mod types;

pub mod completion;
pub mod prompt;

pub use error::GenerateError;
pub use generator::{Generator, DEFAULT_MODEL, MAX_TOKENS, NO_CODE, TEMPERATURE};
pub use openai::OpenAiService;
pub use types::{GenerateRequest, GenerateResponse, Role, Turn};
