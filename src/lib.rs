// src/lib.rs

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod prompt;
pub mod server;
pub mod state;
