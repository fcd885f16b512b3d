//! OpenAI-compatible chat completion backend for outline generation.

pub mod chat;

pub use chat::ChatCompletionClient;
