//! Local stand-in for the upstream chat endpoint.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const AJAX_PATH: &str = "/wp-admin/admin-ajax.php";

pub enum StubMode {
    Stream(String),
    Status(u16),
    Slow(Duration),
}

pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub form: HashMap<String, String>,
}

pub struct StubUpstream {
    mode: StubMode,
    requests: Mutex<Vec<CapturedRequest>>,
}

impl StubUpstream {
    pub async fn requests(&self) -> tokio::sync::MutexGuard<'_, Vec<CapturedRequest>> {
        self.requests.lock().await
    }
}

pub fn delta(content: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
    )
}

pub async fn spawn(app: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Starts a stub upstream and returns its base URL.
pub async fn spawn_upstream(mode: StubMode) -> (String, Arc<StubUpstream>) {
    let stub = Arc::new(StubUpstream {
        mode,
        requests: Mutex::new(Vec::new()),
    });
    let app = axum::Router::new()
        .route(AJAX_PATH, post(handle))
        .with_state(stub.clone());
    let addr = spawn(app).await;
    (format!("http://{addr}"), stub)
}

async fn handle(
    State(stub): State<Arc<StubUpstream>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    stub.requests
        .lock()
        .await
        .push(CapturedRequest { headers, form });

    match &stub.mode {
        StubMode::Stream(body) => (StatusCode::OK, body.clone()).into_response(),
        StubMode::Status(code) => (
            StatusCode::from_u16(*code).unwrap(),
            "upstream unavailable",
        )
            .into_response(),
        StubMode::Slow(delay) => {
            tokio::time::sleep(*delay).await;
            (StatusCode::OK, delta("late")).into_response()
        }
    }
}
