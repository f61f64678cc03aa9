use serde::{Deserialize, Serialize};

/// The author of a message.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The system instructions.
    System,
    /// A user input.
    #[default]
    User,
    /// A reply from the model.
    Assistant,
    /// Developer instructions (the newer name for system instructions).
    Developer,
    /// The result of a tool call.
    Tool,
}

/// A message in the conversation.
///
/// Messages are never modified once they are appended to a conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The author of this message.
    pub role: Role,
    /// The text content, may be empty.
    #[serde(default)]
    pub content: String,
    /// Tools the model asks to call, only present on assistant messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// An optional name for the participant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The tool call this message answers, only set on tool results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    #[inline]
    fn with_role<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Creates a system message.
    #[inline]
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::with_role(Role::System, content)
    }

    /// Creates a developer message.
    #[inline]
    pub fn developer<S: Into<String>>(content: S) -> Self {
        Self::with_role(Role::Developer, content)
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Creates an assistant message without tool calls.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Creates a tool result message answering the call with `tool_call_id`.
    #[inline]
    pub fn tool_result<ID: Into<String>, S: Into<String>>(
        tool_call_id: ID,
        content: S,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
            ..Default::default()
        }
    }

    /// Attaches tool calls to this message.
    #[inline]
    pub fn with_tool_calls(
        mut self,
        tool_calls: impl Into<Vec<ToolCall>>,
    ) -> Self {
        self.tool_calls = tool_calls.into();
        self
    }

    /// Sets the participant name.
    #[inline]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` if the model asks for at least one tool call.
    #[inline]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool call requested by the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCall {
    /// Opaque identifier assigned by the remote side.
    ///
    /// It must be echoed back in the result message.
    pub id: String,
    /// The function to call.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Creates a function tool call.
    #[inline]
    pub fn function<ID, N, A>(id: ID, name: N, arguments: A) -> Self
    where
        ID: Into<String>,
        N: Into<String>,
        A: Into<String>,
    {
        Self {
            id: id.into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// The function part of a [`ToolCall`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the tool to call.
    pub name: String,
    /// Raw argument text, usually JSON but never parsed by the loop.
    pub arguments: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tool_result_echoes_id() {
        let msg = Message::tool_result("call_1", "42");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert!(!msg.has_tool_calls());
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let msg = Message::user("Hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({ "role": "user", "content": "Hi" }));
    }

    #[test]
    fn test_deserialize_assistant_with_tool_calls() {
        let msg: Message = serde_json::from_value(json!({
            "role": "assistant",
            "tool_calls": [{
                "id": "t1",
                "function": { "name": "echo", "arguments": "hi" }
            }]
        }))
        .unwrap();
        assert_eq!(msg.content, "");
        assert!(msg.has_tool_calls());
        assert_eq!(msg.tool_calls[0], ToolCall::function("t1", "echo", "hi"));
    }
}
