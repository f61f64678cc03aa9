use reloop_model::{ErrorKind, Message, ToolCall, Usage};
use serde::{Deserialize, Serialize};

/// A scripted reply for one completion request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// Reply with a single choice carrying this message.
    #[serde(rename = "message")]
    Message {
        /// The assistant message.
        message: Message,
        /// Usage reported alongside the message.
        usage: Option<Usage>,
    },
    /// Reply successfully, but without any choice.
    #[serde(rename = "no_choices")]
    NoChoices,
    /// Fail the request.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
}

impl PresetResponse {
    /// An assistant reply with text content and no tool calls.
    #[inline]
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self::Message {
            message: Message::assistant(content),
            usage: None,
        }
    }

    /// An assistant reply that only requests tool calls.
    #[inline]
    pub fn tool_calls(tool_calls: impl Into<Vec<ToolCall>>) -> Self {
        Self::Message {
            message: Message::assistant("").with_tool_calls(tool_calls),
            usage: None,
        }
    }

    /// A failed request.
    #[inline]
    pub fn failure(failure: PresetFailure) -> Self {
        Self::Failure(failure)
    }

    /// Attaches usage to a message reply, other replies are unchanged.
    #[inline]
    pub fn with_usage(self, usage: Usage) -> Self {
        match self {
            Self::Message { message, .. } => Self::Message {
                message,
                usage: Some(usage),
            },
            other => other,
        }
    }
}

/// The failures a preset can simulate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PresetFailure {
    /// The request never reached the server.
    Transport,
    /// The server rejected the credentials.
    Authentication,
    /// The server is rate limiting.
    RateLimit,
    /// The server is down.
    ServiceUnavailable,
    /// The body could not be decoded.
    MalformedResponse,
}

impl PresetFailure {
    /// Returns the error kind this failure is reported as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PresetFailure::Transport => ErrorKind::Transport,
            PresetFailure::Authentication => ErrorKind::Authentication,
            PresetFailure::RateLimit => ErrorKind::RateLimit,
            PresetFailure::ServiceUnavailable => ErrorKind::ServiceUnavailable,
            PresetFailure::MalformedResponse => ErrorKind::MalformedResponse,
        }
    }
}
