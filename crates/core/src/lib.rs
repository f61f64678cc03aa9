//! Core logic including the ReAct loop, tool dispatching, payload and
//! errors.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod error;
mod model_client;
mod payload;
mod react;
pub mod tool;

pub use error::Error;
pub use payload::CompletionRequestPayload;
pub use react::{Completion, ReactLoop};
pub use tool::{Tool, ToolDefinition, TypedTool};
