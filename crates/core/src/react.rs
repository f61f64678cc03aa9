mod state;
#[cfg(test)]
mod tests;

use reloop_model::{Message, ModelProvider, Usage};
use tracing::Instrument;

use crate::Error;
use crate::model_client::ModelClient;
use crate::payload::CompletionRequestPayload;
use state::RunState;

/// The outcome of a successful loop run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    /// The final assistant message. Its content may be empty.
    pub message: Message,
    /// Usage summed over every iteration that reported it.
    pub usage: Option<Usage>,
    /// How many completion requests were sent.
    pub iterations: usize,
}

/// Drives the request, inspect and dispatch cycle until the model answers
/// without requesting tools.
///
/// The loop is strictly sequential: one request at a time, tool calls
/// executed in the order they were requested. Transport failures abort the
/// run immediately and are never retried here.
#[derive(Clone)]
pub struct ReactLoop {
    model_client: ModelClient,
}

impl ReactLoop {
    /// Creates a loop that talks to `provider`.
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        Self {
            model_client: ModelClient::new(provider),
        }
    }

    /// Runs the loop on `payload` for at most `max_iterations` requests.
    ///
    /// Every reply and tool result is appended to `payload`, and stays
    /// there whatever the outcome. An empty history or a zero ceiling is
    /// rejected before anything is sent.
    pub async fn run(
        &self,
        payload: &mut CompletionRequestPayload,
        max_iterations: usize,
    ) -> Result<Completion, Error> {
        if payload.messages().is_empty() {
            return Err(Error::InvalidPayload(
                "the conversation has no messages".to_owned(),
            ));
        }
        if max_iterations == 0 {
            return Err(Error::InvalidPayload(
                "max iterations must be at least 1".to_owned(),
            ));
        }

        async move {
            let mut state = RunState::new(max_iterations);
            loop {
                let Some(outcome) =
                    state.step(&self.model_client, payload).await
                else {
                    continue;
                };
                match &outcome {
                    Ok(completion) => info!(
                        "final answer after {} iteration(s): {:?}",
                        completion.iterations, completion.message.content
                    ),
                    Err(err) => debug!("loop stopped: {err}"),
                }
                return outcome;
            }
        }
        .instrument(debug_span!("react loop"))
        .await
    }
}
