use reloop_core::tool::{Error as ToolError, ToolResult, TypedTool};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

/// Inputs longer than this are rejected.
const MAX_CHARS: usize = 100_000;

/// Parameters of [`WordCountTool`].
#[derive(Deserialize, JsonSchema)]
pub struct WordCountToolParameters {
    #[schemars(description = "The text to count words in.")]
    text: String,
}

/// A tool for counting lines, words and characters of a text.
pub struct WordCountTool {
    parameter_schema: Value,
}

impl WordCountTool {
    /// Creates a new word count tool.
    #[inline]
    pub fn new() -> Self {
        WordCountTool {
            parameter_schema: schema_for!(WordCountToolParameters).to_value(),
        }
    }
}

impl Default for WordCountTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypedTool for WordCountTool {
    type Input = WordCountToolParameters;

    fn name(&self) -> &str {
        "word_count"
    }

    fn description(&self) -> &str {
        r#"
Counts the lines, words and characters of a text, like `wc`.
Prefer this tool over counting by yourself."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn call(&self, input: WordCountToolParameters) -> ToolResult {
        let chars = input.text.chars().count();
        if chars > MAX_CHARS {
            return Err(ToolError::execution_error().with_reason(format!(
                "text is too long ({chars} characters, at most {MAX_CHARS})"
            )));
        }
        let lines = input.text.lines().count();
        let words = input.text.split_whitespace().count();
        Ok(format!("lines: {lines}, words: {words}, characters: {chars}"))
    }
}
