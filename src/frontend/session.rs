//! Client-side conversation state.
//!
//! A [`Session`] is everything the page renders: the prompt being typed,
//! whether a request is outstanding, the latest generated code and the
//! transcript. Submissions go through [`Session::begin`] and always end in
//! [`Session::finish`], whatever the outcome of the request.

use crate::generate_core::{GenerateRequest, GenerateResponse, Turn};

use super::transport::TransportError;

pub static ERROR_PLACEHOLDER: &str = "// Error generating code. Please try again.";
pub static CODE_PLACEHOLDER: &str = "// Generated code will appear here";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub prompt: String,
    pub in_flight: bool,
    pub generated_code: String,
    pub transcript: Vec<Turn>,
}

/// A request handed out by [`Session::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request: GenerateRequest,
}

impl Session {
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.prompt.trim().is_empty()
    }

    /// Starts a submission, or does nothing while the prompt is blank or a
    /// request is already outstanding.
    pub fn begin(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        Some(Submission {
            request: GenerateRequest::new(self.prompt.clone(), self.transcript.clone()),
        })
    }

    pub fn finish(
        &mut self,
        submission: Submission,
        outcome: Result<GenerateResponse, TransportError>,
    ) {
        match outcome {
            Ok(response) => {
                self.generated_code = if response.code.is_empty() {
                    CODE_PLACEHOLDER.to_owned()
                } else {
                    response.code
                };
                self.transcript = response.history;
            }
            Err(err) => {
                tracing::warn!("error generating code: {}", err);
                self.generated_code = ERROR_PLACEHOLDER.to_owned();
                self.transcript.push(Turn::user(submission.request.prompt));
                self.transcript.push(Turn::assistant(ERROR_PLACEHOLDER));
            }
        }
        self.prompt.clear();
        self.in_flight = false;
    }
}
