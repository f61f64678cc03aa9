use reloop_model::{Message, ToolCall, Usage};

use super::Completion;
use crate::Error;
use crate::model_client::ModelClient;
use crate::payload::CompletionRequestPayload;
use crate::tool;

/// The stages of a loop run.
#[derive(Debug)]
pub enum LoopStage {
    /// A completion request is about to be sent.
    Requesting,
    /// A new assistant message has been appended and needs inspection.
    Inspecting,
    /// The newest assistant message requested these tools.
    Dispatching(Vec<ToolCall>),
    /// The newest assistant message is the final answer.
    Terminal(Message),
    /// The iteration ceiling was hit while tools were still requested.
    BudgetExceeded,
    /// The transport failed.
    Failed(Error),
}

/// Bookkeeping of a single loop run.
pub struct RunState {
    stage: LoopStage,
    iteration: usize,
    max_iterations: usize,
    usage: Option<Usage>,
}

impl RunState {
    #[inline]
    pub fn new(max_iterations: usize) -> Self {
        Self {
            stage: LoopStage::Requesting,
            iteration: 0,
            max_iterations,
            usage: None,
        }
    }

    /// Advances to the next stage. Returns the outcome once a final stage
    /// is reached.
    pub async fn step(
        &mut self,
        model_client: &ModelClient,
        payload: &mut CompletionRequestPayload,
    ) -> Option<Result<Completion, Error>> {
        let stage = std::mem::replace(&mut self.stage, LoopStage::Requesting);
        self.stage = match stage {
            LoopStage::Requesting => {
                self.iteration += 1;
                debug!(
                    "iteration {}/{}: requesting a completion",
                    self.iteration, self.max_iterations
                );
                match model_client.send_completion(payload).await {
                    Ok(usage) => {
                        self.add_usage(usage);
                        LoopStage::Inspecting
                    }
                    Err(err) => LoopStage::Failed(err),
                }
            }
            LoopStage::Inspecting => self.inspect(payload),
            LoopStage::Dispatching(tool_calls) => {
                debug!(
                    "iteration {}: dispatching {} tool call(s)",
                    self.iteration,
                    tool_calls.len()
                );
                tool::dispatch(payload, &tool_calls);
                if self.iteration >= self.max_iterations {
                    LoopStage::BudgetExceeded
                } else {
                    LoopStage::Requesting
                }
            }
            LoopStage::Terminal(message) => {
                return Some(Ok(Completion {
                    message,
                    usage: self.usage,
                    iterations: self.iteration,
                }));
            }
            LoopStage::BudgetExceeded => {
                return Some(Err(Error::BudgetExceeded {
                    max_iterations: self.max_iterations,
                }));
            }
            LoopStage::Failed(err) => return Some(Err(err)),
        };
        None
    }

    fn inspect(&self, payload: &CompletionRequestPayload) -> LoopStage {
        let Some(message) = payload.last_message() else {
            return LoopStage::Failed(Error::MalformedResponse(
                "no message was appended".to_owned(),
            ));
        };
        if message.has_tool_calls() {
            LoopStage::Dispatching(message.tool_calls.clone())
        } else {
            LoopStage::Terminal(message.clone())
        }
    }

    fn add_usage(&mut self, usage: Option<Usage>) {
        let Some(usage) = usage else {
            return;
        };
        *self.usage.get_or_insert_default() += usage;
    }
}
