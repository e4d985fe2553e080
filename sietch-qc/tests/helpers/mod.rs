//! In-process fake inventory service
//!
//! Serves the endpoints the tools use on an ephemeral local port, backed by
//! an in-memory component map, so the real HTTP client can be exercised end
//! to end.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use sietch_common::{ClientConfig, InventoryClient};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const BATCH_TYPE: &str = "UK Batch";
pub const BOARD_TYPE: &str = "UK Board";
pub const TOKEN: &str = "test-token-1234";

pub fn credentials() -> Value {
    json!({"username": "qc-robot", "password": "secret"})
}

type WriteFilter = Box<dyn Fn(&Value) -> bool + Send>;

#[derive(Default)]
pub struct InventoryState {
    /// record id → `{"type": ..., "data": ...}`
    pub components: BTreeMap<String, Value>,
    /// record ids posted to, in order
    pub writes: Vec<String>,
    /// records matching this predicate are refused with 500
    pub reject_writes: Option<WriteFilter>,
}

pub type SharedInventory = Arc<Mutex<InventoryState>>;

pub struct FakeInventory {
    pub state: SharedInventory,
    pub base_url: String,
}

impl FakeInventory {
    pub async fn start() -> Self {
        let state: SharedInventory = Arc::new(Mutex::new(InventoryState::default()));

        let app = Router::new()
            .route("/machineAuthenticate", post(authenticate))
            .route("/api/search/component/:component_type", post(search))
            .route("/api/generateComponentUuid", get(generate_uuid))
            .route("/api/component/:id", get(fetch_component).post(store_component))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::from_json_str(
            &json!({"url": self.base_url, "auth": credentials()}).to_string(),
        )
        .unwrap()
    }

    pub async fn client(&self) -> InventoryClient {
        InventoryClient::login(&self.config()).await.unwrap()
    }

    pub fn insert(&self, component_type: &str, data: Value) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.state
            .lock()
            .unwrap()
            .components
            .insert(id.clone(), json!({"type": component_type, "data": data}));
        id
    }

    pub fn insert_batch(&self, batch: u32, board_type: &str) -> String {
        self.insert(
            BATCH_TYPE,
            json!({"name": format!("Batch {}", batch), "batchId": batch, "number": 5, "boardType": board_type}),
        )
    }

    pub fn insert_board(&self, batch: u32, board: u32, extra: Value) -> String {
        let mut data = json!({
            "name": format!("Batch {} board {}", batch, board),
            "batchId": batch,
            "boardId": board,
            "boardType": "Head X 1",
            "boardStatus": "received"
        });
        if let (Some(target), Value::Object(extra)) = (data.as_object_mut(), extra) {
            target.extend(extra);
        }
        self.insert(BOARD_TYPE, data)
    }

    pub fn component(&self, id: &str) -> Option<Value> {
        self.state.lock().unwrap().components.get(id).cloned()
    }

    /// Components of one type whose data matches every given field
    pub fn find(&self, component_type: &str, fields: &[(&str, Value)]) -> Vec<(String, Value)> {
        let state = self.state.lock().unwrap();
        state
            .components
            .iter()
            .filter(|(_, c)| c["type"] == component_type)
            .filter(|(_, c)| fields.iter().all(|(k, v)| &c["data"][*k] == v))
            .map(|(id, c)| (id.clone(), c.clone()))
            .collect()
    }

    pub fn writes(&self) -> Vec<String> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn reject_writes_when<F>(&self, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + 'static,
    {
        self.state.lock().unwrap().reject_writes = Some(Box::new(predicate));
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Missing or invalid token").into_response()
}

async fn authenticate(Json(body): Json<Value>) -> Response {
    if body == credentials() {
        TOKEN.into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
    }
}

async fn search(
    State(state): State<SharedInventory>,
    Path(component_type): Path<String>,
    headers: HeaderMap,
    Json(query): Json<Map<String, Value>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let hits: Vec<Value> = state
        .components
        .iter()
        .filter(|(_, c)| c["type"] == component_type.as_str())
        .filter(|(_, c)| {
            query.iter().all(|(key, expected)| match key.strip_prefix("data.") {
                Some(field) => &c["data"][field] == expected,
                None => false,
            })
        })
        .map(|(id, c)| json!({"componentUuid": id, "type": c["type"], "data": c["data"]}))
        .collect();
    Json(hits).into_response()
}

async fn generate_uuid(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(uuid::Uuid::new_v4().to_string()).into_response()
}

async fn fetch_component(
    State(state): State<SharedInventory>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    match state.components.get(&id) {
        Some(component) => {
            // Real records carry bookkeeping members the tools must not post back
            let mut full = component.clone();
            full["componentUuid"] = json!(id);
            full["insertion"] = json!({"user": "someone", "insertDate": "2024-01-01"});
            full["validity"] = json!({"version": 1});
            Json(full).into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("No component {}", id)).into_response(),
    }
}

async fn store_component(
    State(state): State<SharedInventory>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    if let Some(reject) = &state.reject_writes {
        if reject(&body) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "database refused write").into_response();
        }
    }
    let keys: Vec<&String> = body.as_object().map(|o| o.keys().collect()).unwrap_or_default();
    if keys.iter().any(|k| k.as_str() != "type" && k.as_str() != "data") {
        return (StatusCode::BAD_REQUEST, "only type and data may be posted").into_response();
    }
    state.components.insert(id.clone(), body);
    state.writes.push(id);
    StatusCode::OK.into_response()
}
