#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::generate_core::Role;

#[derive(PartialEq, Props)]
pub struct TurnProps {
    role: Role,
    content: String,
}

pub fn TurnBubble(cx: Scope<TurnProps>) -> Element {
    let (class, speaker) = match cx.props.role {
        Role::User => ("chat-message user-message", "You"),
        _ => ("chat-message other-message", "AI"),
    };
    cx.render(rsx!(
        div {
            class: class,
            strong { "{speaker}: " }
            "{cx.props.content}"
        }
    ))
}

pub fn Spinner(cx: Scope) -> Element {
    cx.render(rsx!(div { class: "spinner" }))
}

#[derive(PartialEq, Props)]
pub struct CodeProps {
    code: String,
}

pub fn CodeViewer(cx: Scope<CodeProps>) -> Element {
    cx.render(rsx!(
        div {
            id: "code-viewer",
            h3 { "Generated Code" }
            pre {
                code { "{cx.props.code}" }
            }
        }
    ))
}
