use dioxus::prelude::*;

use super::components::*;
use super::session::Session;
use super::transport::{GenerateTransport, HttpTransport};

pub struct AppProps {
    pub transport: HttpTransport,
}

pub fn app(cx: Scope<AppProps>) -> Element {
    let session = use_ref(cx, Session::default);
    let transport = &cx.props.transport;

    let submit = move |_| {
        let Some(submission) = session.write().begin() else {
            return;
        };

        cx.spawn({
            to_owned![session, transport];

            async move {
                let outcome = transport.generate(&submission.request).await;
                session.write().finish(submission, outcome);
            }
        });
    };

    let state = session.read().clone();
    let prompt = state.prompt.as_str();
    let in_flight = state.in_flight;
    let disabled = !state.can_submit();
    let label = if in_flight { "Generating..." } else { "Generate Code" };
    let code = state.generated_code.as_str();
    let transcript = &state.transcript;

    cx.render(rsx!(
        style { include_str!("./style.css") }
        div {
            id: "header",
            h1 {"CodeGen"}
            h2 {"Describe what you want to build"}
        }
        div {
            id: "input-area",
            textarea {
                id: "user-input",
                placeholder: "e.g., Create a function that merges two sorted lists...",
                value: "{prompt}",
                oninput: move |evt| session.write().prompt = evt.value.clone(),
            }
            button {
                id: "send-button",
                disabled: "{disabled}",
                onclick: submit,
                if in_flight {
                    rsx!(Spinner {})
                }
                "{label}"
            }
        }
        if !code.is_empty() {
            rsx!(
                div {
                    id: "chat-window",
                    class: "chat-window",
                    for turn in transcript.iter() {
                        TurnBubble { role: turn.role, content: turn.content.clone() }
                    }
                }
                CodeViewer { code: code.to_owned() }
            )
        }
    ))
}
