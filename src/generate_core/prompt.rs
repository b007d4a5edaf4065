use indoc::indoc;
use serde_json::Value;

use super::types::{Role, Turn};

pub static SYSTEM_PROMPT: &str = indoc! {r#"
    You are an expert software developer. Generate clean, production-ready code based on the user's request.

    Requirements:
    - Write clean, well-commented code
    - Follow modern best practices and conventions
    - Include proper error handling
    - Prefer a statically typed language or dialect when appropriate
    - Return only the code, no explanations unless specifically requested
    - If the request is unclear, make reasonable assumptions

    Before producing the code, reason through these stages in order:

    1) Plan
    2) Think
    3) Validate
    4) Output

    For example:
    Prompt -> "User": Generate a snake game using React
    #Plan "Assistant": The user wants a snake game built with React. I will prepare a plan that best fits the request.
    #Think "Assistant": I list the pieces the game needs (board, snake state, food, game loop, input handling), check the current React APIs for each, and keep the project type-safe.
    #Validate "Assistant": I review the draft for bugs and inconsistencies and settle on the best fix for each. Nothing is presented yet.
    #Output "Assistant": I emit the final code.
"#};

pub fn instruction(prompt: &str) -> String {
    format!("Generate code for: {prompt}")
}

/// Keeps every element with string `role` and `content`. Roles other than
/// user/assistant are demoted to user, so a caller can never inject a system
/// turn. Anything that is not an array yields an empty history.
pub fn filter_history(history: &Value) -> Vec<Turn> {
    let Some(entries) = history.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let role = entry.get("role")?.as_str()?;
            let content = entry.get("content")?.as_str()?;
            let role = match role {
                "assistant" => Role::Assistant,
                _ => Role::User,
            };
            Some(Turn::new(role, content))
        })
        .collect()
}

/// system -> history -> current prompt. The order is the conversational
/// context the model sees.
pub fn assemble(prompt: &str, history: &[Turn]) -> Vec<Turn> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Turn::new(Role::System, SYSTEM_PROMPT));
    messages.extend_from_slice(history);
    messages.push(Turn::user(instruction(prompt)));
    messages
}
