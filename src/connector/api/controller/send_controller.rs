use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::application::RelayReply;

use super::super::{ApiError, Container};

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Selects a keyed session; the default session when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `POST /send`
pub async fn send(
    State(container): State<Arc<Container>>,
    body: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<RelayReply>, ApiError> {
    let Json(request) = body.map_err(|e| {
        ApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
    })?;

    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Message not provided"))?;

    let reply = container
        .send_use_case()
        .execute(request.session_id.as_deref(), &message)
        .await?;

    Ok(Json(reply))
}
