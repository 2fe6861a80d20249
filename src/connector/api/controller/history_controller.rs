use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::application::SessionHistory;

use super::super::Container;

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

/// `GET /history`
pub async fn history(
    State(container): State<Arc<Container>>,
    Query(query): Query<SessionQuery>,
) -> Json<SessionHistory> {
    let history = container
        .history_use_case()
        .execute(query.session_id.as_deref())
        .await;
    Json(history)
}

/// `DELETE /history`
pub async fn clear(
    State(container): State<Arc<Container>>,
    Query(query): Query<SessionQuery>,
) -> Json<SessionHistory> {
    let session_id = container
        .manage_session_use_case()
        .clear(query.session_id.as_deref())
        .await;
    Json(SessionHistory {
        session_id,
        chat_history: Vec::new(),
    })
}
