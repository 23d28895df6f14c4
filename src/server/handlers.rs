// src/server/handlers.rs

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::error::AppError;
use crate::extract::{self, SentimentResult};
use crate::llm::ChatMessage;
use crate::prompt;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tone: String,
}

/// Sentiment scoring. Extraction failures never surface as an HTTP error:
/// a neutral fallback is always returned with 200. Upstream completion
/// failures propagate through `?` as a generic 500.
///
/// POST /anal
pub async fn analyze_sentiment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<SentimentResult>, AppError> {
    let messages = [ChatMessage::user(prompt::sentiment_prompt(&req.text))];
    let completion = state.llm.complete(&messages).await?;
    Ok(Json(extract::sentiment_or_fallback(&completion)))
}

/// Email tone rewriting. Unlike sentiment, a missing rewritten email has no
/// usable default, so extraction failure is a 500 with an explicit error
/// record.
///
/// POST /new_email
pub async fn rewrite_email(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RewriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let messages = [ChatMessage::user(prompt::rewrite_prompt(&req.email, &req.tone))];
    let completion = state.llm.complete(&messages).await?;

    match extract::extract_email(&completion) {
        Ok(result) => Ok((StatusCode::OK, Json(serde_json::json!({ "email": result.email })))),
        Err(e) => {
            warn!(error = %e, completion = %completion, "email extraction failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Could not generate email", "email": "" })),
            ))
        }
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
