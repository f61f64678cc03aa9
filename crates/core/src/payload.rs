use reloop_model::{CompletionRequest, Message, ToolChoice};

use crate::conversation::Conversation;
use crate::tool::ToolDefinition;

/// The state threaded through every iteration of a loop run.
///
/// The message history is append-only: the loop and the caller can add
/// messages, but nothing is ever removed or rewritten. After a run, the
/// appended messages (assistant replies and tool results) can be inspected
/// with [`new_messages`](Self::new_messages).
#[derive(Clone, Debug, Default)]
pub struct CompletionRequestPayload {
    /// The model to use. Empty means the provider's configured model.
    pub model: String,
    messages: Conversation,
    /// Tools the model may call.
    pub tools: Vec<ToolDefinition>,
    /// How the model should pick tools. Omitted from the request when unset.
    pub tool_choice: Option<ToolChoice>,
}

impl CompletionRequestPayload {
    /// Creates a payload whose initial history is `messages`.
    #[inline]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: Conversation::with_history(messages),
            ..Default::default()
        }
    }

    /// Sets the model.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Registers a tool.
    #[inline]
    pub fn with_tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    /// Registers several tools.
    #[inline]
    pub fn with_tools<I>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = ToolDefinition>,
    {
        self.tools.extend(tools);
        self
    }

    /// Sets the tool choice directive.
    #[inline]
    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    /// Returns the full message history.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the messages appended since the payload was created.
    #[inline]
    pub fn new_messages(&self) -> &[Message] {
        self.messages.new_messages()
    }

    /// Returns the most recently appended message.
    #[inline]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Appends a message.
    #[inline]
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends several messages, e.g. a follow-up question after a run.
    #[inline]
    pub fn add_messages<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>,
    {
        self.messages.extend(messages);
    }

    /// Builds the wire-independent request for the current history.
    pub fn to_request(&self) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: self.messages.to_vec(),
            tools: self.tools.iter().map(ToolDefinition::spec).collect(),
            tool_choice: self.tool_choice.clone(),
        }
    }
}
