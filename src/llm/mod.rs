// src/llm/mod.rs

pub mod client;
pub mod schema;

pub use client::{CompletionClient, GroqClient};
pub use schema::ChatMessage;
