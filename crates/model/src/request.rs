use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Message;

/// A request to be sent to the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompletionRequest {
    /// The model to use. Providers fall back to their configured model
    /// when this is empty.
    pub model: String,
    /// The full message history.
    pub messages: Vec<Message>,
    /// Tools that are available to the model.
    pub tools: Vec<ToolSpec>,
    /// How the model should pick tools.
    pub tool_choice: Option<ToolChoice>,
}

/// Describes a tool that can be used by the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Name of the tool, unique within a request.
    pub name: String,
    /// Description of the tool.
    #[serde(default)]
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// For most model providers, the parameters should typically be
    /// defined by a [JSON schema](https://json-schema.org/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// Controls whether and which tool the model should call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolChoice {
    /// The model decides.
    Auto,
    /// The model must not call tools.
    None,
    /// The model must call at least one tool.
    Required,
    /// The model must call the named function.
    Function(String),
}
