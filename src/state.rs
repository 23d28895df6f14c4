// src/state.rs

use std::sync::Arc;

use crate::llm::CompletionClient;

/// Shared per-process state handed to every handler. The relay is stateless
/// beyond the completion client itself.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }
}
