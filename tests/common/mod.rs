//! Shared test fixtures for the SDK integration tests.
//!
//! Provides `serve()`, a local axum backend that answers requests with a
//! fixed sequence of canned responses and records what it received, and a
//! few sample builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use chrono::NaiveDate;
use retail_dashboard_sdk::models::{DailySales, Product};
use retail_dashboard_sdk::DashboardSdk;
use tokio::sync::Notify;

/// Upper bound on how long a stub server stays up waiting for requests.
const SERVE_TIMEOUT: Duration = Duration::from_secs(10);

/// A request as seen by the stub server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Held back this long before the response is sent.
    pub delay: Option<Duration>,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "text/plain".into())],
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
            delay: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl IntoResponse for StubResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.append(name, value);
            }
        }
        (status, headers, self.body).into_response()
    }
}

struct StubState {
    responses: Mutex<VecDeque<StubResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    drained: Notify,
}

/// Handle to a running stub server.
pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Wait for the server to hand out all its responses and shut down, and
    /// return the recorded requests in arrival order.
    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
        self.state.requests.lock().unwrap().clone()
    }
}

async fn respond(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        target: uri
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let next = {
        let mut queue = state.responses.lock().unwrap();
        let next = queue.pop_front();
        if queue.is_empty() {
            state.drained.notify_one();
        }
        next
    };
    let Some(response) = next else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "no stub response left").into_response();
    };
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }
    response.into_response()
}

/// Start a server answering requests with `responses`, in order. It shuts
/// down once every response has been handed out.
pub fn serve(responses: Vec<StubResponse>) -> StubServer {
    let state = Arc::new(StubState {
        responses: Mutex::new(responses.into()),
        requests: Mutex::new(Vec::new()),
        drained: Notify::new(),
    });
    let (addr_tx, addr_rx) = mpsc::channel();
    let server_state = Arc::clone(&state);

    let handle = thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            addr_tx.send(listener.local_addr().unwrap()).unwrap();

            let shutdown_state = Arc::clone(&server_state);
            let app = Router::new().fallback(respond).with_state(server_state);
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    tokio::select! {
                        _ = shutdown_state.drained.notified() => {}
                        _ = tokio::time::sleep(SERVE_TIMEOUT) => {}
                    }
                })
                .await
                .unwrap();
        });
    });

    let addr = addr_rx.recv().unwrap();
    StubServer {
        base_url: format!("http://{}", addr),
        state,
        handle: Some(handle),
    }
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn daily(order_at: &str, revenue: f64, profit: f64) -> DailySales {
    DailySales {
        order_at: order_at.to_string(),
        total_revenue: revenue,
        total_profit: profit,
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Grilled fish".into(),
            sku: Some("SKU001".into()),
            image_url: None,
            unit_price: 150_000.0,
            sale_price: 180_000.0,
            stock_quantity: 150,
        },
        Product {
            id: 2,
            name: "Fish sauce".into(),
            sku: Some("SKU002".into()),
            image_url: None,
            unit_price: 20_000.0,
            sale_price: 35_000.0,
            stock_quantity: 0,
        },
    ]
}

/// SDK pointed at a stub server.
pub fn sdk_for(server: &StubServer) -> DashboardSdk {
    DashboardSdk::builder()
        .base_url(server.base_url.clone())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
