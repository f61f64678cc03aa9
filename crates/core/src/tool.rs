//! Tool call supports.

mod dispatcher;
mod error;
mod registry;

use std::fmt::{self, Debug};
use std::sync::Arc;

use reloop_model::ToolSpec;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub(crate) use dispatcher::dispatch;
pub use error::{Error, ErrorKind};
pub(crate) use registry::Registry;

/// The result of a typed tool call.
pub type ToolResult = Result<String, Error>;

/// A tool that can be called by the model.
///
/// The loop only ever sees raw text: the arguments string produced by the
/// model goes in, the result text comes out. A tool has no failure channel,
/// failures must be described in the returned text.
pub trait Tool: Send + Sync + 'static {
    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the JSON schema of the tool's parameters, if declared.
    fn parameters(&self) -> Option<&Value> {
        None
    }

    /// Invokes the tool with the raw argument text.
    fn invoke(&self, arguments: &str) -> String;
}

/// A tool backed by a closure.
pub struct FunctionTool<F> {
    name: String,
    description: String,
    parameters: Option<Value>,
    f: F,
}

impl<F> FunctionTool<F>
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    /// Creates a tool named `name` that invokes `f`.
    #[inline]
    pub fn new<S: Into<String>>(name: S, f: F) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: None,
            f,
        }
    }

    /// Sets the description of the tool.
    #[inline]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the parameter schema of the tool.
    #[inline]
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl<F> Tool for FunctionTool<F>
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    fn parameters(&self) -> Option<&Value> {
        self.parameters.as_ref()
    }

    #[inline]
    fn invoke(&self, arguments: &str) -> String {
        (self.f)(arguments)
    }
}

/// A tool that takes structured input.
///
/// Implementations of this trait should be stateless. Use [`ToolDefinition::typed`]
/// to register one: the arguments are decoded into [`TypedTool::Input`], and
/// the outcome is encoded as `{"result": ...}` or `{"error": ...}`.
pub trait TypedTool: Send + Sync + 'static {
    /// The type of input that the tool accepts.
    type Input: DeserializeOwned;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the parameter schema of the tool.
    fn parameter_schema(&self) -> &Value;

    /// Executes the tool with the given input.
    fn call(&self, input: Self::Input) -> ToolResult;
}

struct Typed<T>(T);

impl<T: TypedTool> Tool for Typed<T> {
    #[inline]
    fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    fn description(&self) -> &str {
        self.0.description()
    }

    #[inline]
    fn parameters(&self) -> Option<&Value> {
        Some(self.0.parameter_schema())
    }

    fn invoke(&self, arguments: &str) -> String {
        // Some models send an empty string for parameterless calls.
        let arguments = if arguments.trim().is_empty() {
            "{}"
        } else {
            arguments
        };
        let result = serde_json::from_str::<T::Input>(arguments)
            .map_err(|err| Error::invalid_input().with_reason(err.to_string()))
            .and_then(|input| self.0.call(input));
        match result {
            Ok(output) => json!({ "result": output }).to_string(),
            Err(err) => json!({ "error": err.reason() }).to_string(),
        }
    }
}

/// A tool registered on a payload.
///
/// Definitions are cheap to clone, clones share the same tool.
#[derive(Clone)]
pub struct ToolDefinition(Arc<dyn Tool>);

impl ToolDefinition {
    /// Wraps a tool.
    #[inline]
    pub fn new<T: Tool>(tool: T) -> Self {
        Self(Arc::new(tool))
    }

    /// Creates a definition from a name, a description and a closure.
    #[inline]
    pub fn function<F>(name: &str, description: &str, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(FunctionTool::new(name, f).with_description(description))
    }

    /// Wraps a typed tool.
    #[inline]
    pub fn typed<T: TypedTool>(tool: T) -> Self {
        Self::new(Typed(tool))
    }

    /// Returns the name of the tool.
    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Returns the declaration sent to the model.
    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.0.name().to_owned(),
            description: self.0.description().to_owned(),
            parameters: self.0.parameters().cloned(),
        }
    }

    /// Invokes the tool with the raw argument text.
    #[inline]
    pub fn invoke(&self, arguments: &str) -> String {
        self.0.invoke(arguments)
    }
}

impl Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.0.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct RepeatInput {
        text: String,
        times: usize,
    }

    struct RepeatTool {
        schema: Value,
    }

    impl TypedTool for RepeatTool {
        type Input = RepeatInput;

        fn name(&self) -> &str {
            "repeat"
        }

        fn description(&self) -> &str {
            "Repeats a text"
        }

        fn parameter_schema(&self) -> &Value {
            &self.schema
        }

        fn call(&self, input: RepeatInput) -> ToolResult {
            if input.times > 3 {
                return Err(Error::execution_error().with_reason("too many"));
            }
            Ok(input.text.repeat(input.times))
        }
    }

    fn repeat_tool() -> ToolDefinition {
        ToolDefinition::typed(RepeatTool {
            schema: json!({ "type": "object" }),
        })
    }

    #[test]
    fn test_function_tool() {
        let def = ToolDefinition::function("echo", "Echoes", |args| {
            format!("echo:{args}")
        });
        assert_eq!(def.invoke("hi"), "echo:hi");

        let spec = def.spec();
        assert_eq!(spec.name, "echo");
        assert_eq!(spec.description, "Echoes");
        assert_eq!(spec.parameters, None);
        assert_eq!(format!("{def:?}"), "ToolDefinition { name: \"echo\", .. }");
    }

    #[test]
    fn test_typed_tool_result() {
        let def = repeat_tool();
        assert_eq!(def.spec().parameters, Some(json!({ "type": "object" })));

        let output = def.invoke(r#"{"text":"ab","times":2}"#);
        let output: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(output, json!({ "result": "abab" }));
    }

    #[test]
    fn test_typed_tool_errors() {
        let def = repeat_tool();

        let output: Value =
            serde_json::from_str(&def.invoke(r#"{"text":"ab","times":9}"#))
                .unwrap();
        assert_eq!(output, json!({ "error": "too many" }));

        let output: Value =
            serde_json::from_str(&def.invoke("not json")).unwrap();
        assert!(output["error"].is_string());
        assert!(output.get("result").is_none());

        // An empty argument string decodes as an empty object.
        let output: Value = serde_json::from_str(&def.invoke("")).unwrap();
        assert!(
            output["error"].as_str().unwrap().contains("missing field")
        );
    }
}
