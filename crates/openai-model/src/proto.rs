use reloop_model::{
    Choice as ModelChoice, CompletionRequest, CompletionResponse,
    FinishReason, FunctionCall as ModelFunctionCall, Message as ModelMessage,
    Role, ToolCall as ModelToolCall, ToolChoice, ToolSpec, Usage,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::OpenAIConfig;

// ------------------------------------------
// Types exchanged with the server both ways
// ------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(default = "function_type")]
    pub r#type: String,
    pub function: FunctionCall,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    // The server sends `null` for assistant messages that only call tools.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct FunctionTool {
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct Tool {
    r#type: &'static str,
    function: FunctionTool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<Value>,
}

// -----------
// Conversions
// -----------

fn function_type() -> String {
    "function".to_owned()
}

#[inline]
pub fn create_request(
    req: &CompletionRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    let model = if req.model.is_empty() {
        config.model.clone()
    } else {
        req.model.clone()
    };
    ChatCompletionRequest {
        model,
        messages: req.messages.iter().map(create_message).collect(),
        tools: req.tools.iter().map(create_tool).collect(),
        tool_choice: req.tool_choice.as_ref().map(create_tool_choice),
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    let tool_calls = if msg.tool_calls.is_empty() {
        None
    } else {
        Some(
            msg.tool_calls
                .iter()
                .map(|call| ToolCall {
                    id: call.id.clone(),
                    r#type: function_type(),
                    function: FunctionCall {
                        name: call.function.name.clone(),
                        arguments: call.function.arguments.clone(),
                    },
                })
                .collect(),
        )
    };
    // Tool-only assistant turns go out with a `null` content.
    let content = if msg.content.is_empty() && tool_calls.is_some() {
        None
    } else {
        Some(msg.content.clone())
    };
    Message {
        role: msg.role,
        content,
        tool_calls,
        name: msg.name.clone(),
        tool_call_id: msg.tool_call_id.clone(),
    }
}

#[inline]
fn create_tool(tool: &ToolSpec) -> Tool {
    Tool {
        r#type: "function",
        function: FunctionTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

#[inline]
fn create_tool_choice(choice: &ToolChoice) -> Value {
    match choice {
        ToolChoice::Auto => json!("auto"),
        ToolChoice::None => json!("none"),
        ToolChoice::Required => json!("required"),
        ToolChoice::Function(name) => json!({
            "type": "function",
            "function": { "name": name }
        }),
    }
}

impl From<Message> for ModelMessage {
    fn from(msg: Message) -> Self {
        ModelMessage {
            role: msg.role,
            content: msg.content.unwrap_or_default(),
            tool_calls: msg
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(|call| ModelToolCall {
                    id: call.id,
                    function: ModelFunctionCall {
                        name: call.function.name,
                        arguments: call.function.arguments,
                    },
                })
                .collect(),
            name: msg.name,
            tool_call_id: msg.tool_call_id,
        }
    }
}

impl From<ChatCompletionResponse> for CompletionResponse {
    fn from(resp: ChatCompletionResponse) -> Self {
        CompletionResponse {
            choices: resp
                .choices
                .into_iter()
                .map(|choice| ModelChoice {
                    index: choice.index,
                    message: choice.message.map(Into::into),
                    finish_reason: choice.finish_reason,
                })
                .collect(),
            usage: resp.usage,
        }
    }
}
