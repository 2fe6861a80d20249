use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::{ApiError, Container};

#[derive(Debug, Deserialize)]
pub struct SwitchSessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Session to switch; the default session when absent.
    #[serde(default)]
    pub from: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SwitchSessionResponse {
    pub session_id: String,
}

/// `POST /session`
pub async fn switch(
    State(container): State<Arc<Container>>,
    body: Result<Json<SwitchSessionRequest>, JsonRejection>,
) -> Result<Json<SwitchSessionResponse>, ApiError> {
    let Json(request) = body.map_err(|e| {
        ApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
    })?;

    let new_id = request
        .session_id
        .ok_or_else(|| ApiError::bad_request("session_id not provided"))?;

    let session_id = container
        .manage_session_use_case()
        .switch(request.from.as_deref(), &new_id)
        .await?;

    Ok(Json(SwitchSessionResponse { session_id }))
}
