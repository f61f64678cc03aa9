use reloop_core::tool::{ToolResult, TypedTool};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

/// Parameters of [`EchoTool`].
#[derive(Deserialize, JsonSchema)]
pub struct EchoToolParameters {
    #[schemars(description = "The text to send back.")]
    text: String,
}

/// A tool that sends its input back unchanged.
pub struct EchoTool {
    parameter_schema: Value,
}

impl EchoTool {
    /// Creates a new echo tool.
    #[inline]
    pub fn new() -> Self {
        EchoTool {
            parameter_schema: schema_for!(EchoToolParameters).to_value(),
        }
    }
}

impl Default for EchoTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypedTool for EchoTool {
    type Input = EchoToolParameters;

    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Returns the given text unchanged. Useful for testing tool calls."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn call(&self, input: EchoToolParameters) -> ToolResult {
        Ok(input.text)
    }
}
