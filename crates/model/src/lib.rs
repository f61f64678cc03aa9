//! The data model shared by every part of the tool-calling loop.
//!
//! This crate establishes a protocol between the loop engine and the
//! chat-completion endpoints it talks to. Messages, tool calls and the
//! request/response pair are described here independently of any wire
//! format, so that a provider can be swapped without touching the loop.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod message;
mod provider;
mod request;
mod response;

pub use error::*;
pub use message::*;
pub use provider::*;
pub use request::*;
pub use response::*;
