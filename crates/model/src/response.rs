use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::Message;

/// A complete response from the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Candidate replies, the loop only consumes the first one.
    pub choices: Vec<Choice>,
    /// Token accounting, purely informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Creates a response with a single choice carrying `message`.
    #[inline]
    pub fn with_message(message: Message) -> Self {
        let finish_reason = if message.has_tool_calls() {
            FinishReason::ToolCalls
        } else {
            FinishReason::Stop
        };
        Self {
            choices: vec![Choice {
                index: 0,
                message: Some(message),
                finish_reason: Some(finish_reason),
            }],
            usage: None,
        }
    }
}

/// One candidate reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    /// Position of this choice in the response.
    #[serde(default)]
    pub index: u32,
    /// The reply. Well-behaved providers always set it.
    #[serde(default)]
    pub message: Option<Message>,
    /// The reason why the model stopped generating.
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// The reason why a model response has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model has finished generating text.
    Stop,
    /// The model needs to call a tool.
    ToolCalls,
    /// The output was truncated by the token limit.
    Length,
    /// The output was filtered.
    ContentFilter,
    /// Any other reason.
    #[serde(other)]
    Other,
}

/// Token counts reported by the remote side.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Usage {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Tokens in the generated reply.
    #[serde(default)]
    pub completion_tokens: u64,
    /// Sum of both.
    #[serde(default)]
    pub total_tokens: u64,
}

impl AddAssign for Usage {
    fn add_assign(&mut self, rhs: Self) {
        self.prompt_tokens += rhs.prompt_tokens;
        self.completion_tokens += rhs.completion_tokens;
        self.total_tokens += rhs.total_tokens;
    }
}
