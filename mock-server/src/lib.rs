//! In-memory stand-in for the Smocker admin API.
//!
//! Serves `/reset`, `/mocks`, `/sessions` and `/version` with the same query
//! parameters and JSON shapes as Smocker. Mock definitions are stored as raw
//! JSON; no request matching happens here.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug)]
struct SessionState {
    session: Session,
    mocks: Vec<Value>,
}

#[derive(Debug, Default)]
pub struct Store {
    sessions: Vec<SessionState>,
}

impl Store {
    /// Sessions are addressed by name or id; the newest one wins on duplicates.
    fn position(&self, key: &str) -> Option<usize> {
        self.sessions
            .iter()
            .rposition(|s| s.session.name == key || s.session.id.to_string() == key)
    }

    fn find(&self, key: &str) -> Option<&SessionState> {
        self.position(key).map(|i| &self.sessions[i])
    }

    fn get_or_start(&mut self, key: &str) -> &mut SessionState {
        let index = match self.position(key) {
            Some(index) => index,
            None => {
                self.start(key.to_string());
                self.sessions.len() - 1
            }
        };
        &mut self.sessions[index]
    }

    fn start(&mut self, name: String) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            name,
        };
        self.sessions.push(SessionState {
            session: session.clone(),
            mocks: Vec::new(),
        });
        session
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct AddMocksParams {
    #[serde(default)]
    pub reset: bool,
    pub session: Option<String>,
}

#[derive(Deserialize)]
pub struct SessionParam {
    pub session: Option<String>,
}

#[derive(Deserialize)]
pub struct NameParam {
    #[serde(default)]
    pub name: String,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/reset", post(reset))
        .route("/mocks", get(get_mocks).post(add_mocks))
        .route("/sessions", get(list_sessions).post(start_session))
        .route("/version", get(version))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn reset(State(db): State<Db>) -> StatusCode {
    db.write().await.sessions.clear();
    debug!("store reset");
    StatusCode::OK
}

async fn add_mocks(
    State(db): State<Db>,
    Query(params): Query<AddMocksParams>,
    Json(mocks): Json<Vec<Value>>,
) -> (StatusCode, Json<Value>) {
    if let Some(index) = mocks.iter().position(|m| !is_mock(m)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("mock {index} needs a request and a response") })),
        );
    }

    let mut store = db.write().await;
    let key = params.session.unwrap_or_default();
    let state = store.get_or_start(&key);
    if params.reset {
        state.mocks.clear();
    }
    debug!(session = %key, count = mocks.len(), "mocks registered");
    state.mocks.extend(mocks);
    (
        StatusCode::OK,
        Json(json!({ "message": "Mocks registered successfully" })),
    )
}

async fn get_mocks(State(db): State<Db>, Query(params): Query<SessionParam>) -> Json<Vec<Value>> {
    let store = db.read().await;
    let key = params.session.unwrap_or_default();
    Json(store.find(&key).map(|s| s.mocks.clone()).unwrap_or_default())
}

async fn start_session(State(db): State<Db>, Query(params): Query<NameParam>) -> Json<Session> {
    let session = db.write().await.start(params.name);
    debug!(id = %session.id, name = %session.name, "session started");
    Json(session)
}

async fn list_sessions(State(db): State<Db>) -> Json<Vec<Session>> {
    let store = db.read().await;
    Json(store.sessions.iter().map(|s| s.session.clone()).collect())
}

async fn version() -> Json<Value> {
    Json(json!({
        "app_name": "smocker",
        "build_version": env!("CARGO_PKG_VERSION"),
        "build_commit": "local",
        "build_date": "unknown",
    }))
}

fn is_mock(value: &Value) -> bool {
    value.get("request").is_some_and(Value::is_object)
        && value.get("response").is_some_and(Value::is_object)
}
