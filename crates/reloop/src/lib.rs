//! A tool-calling chat completion client for OpenAI-compatible endpoints.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library: build a [`CompletionRequestPayload`], register tools
//! on it and hand it to [`Client::get_completion`].

#![deny(missing_docs)]

mod client;
pub mod tools;

pub use client::{Client, DEFAULT_MAX_ITERATIONS};
pub use reloop_core::{
    Completion, CompletionRequestPayload, Error, Tool, ToolDefinition,
    TypedTool,
};
pub use reloop_model::{Message, Role, ToolCall, ToolChoice, Usage};
pub use reloop_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

/// Re-exports of [`reloop_core`] crate.
pub mod core {
    pub use reloop_core::*;
}
