use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

/// What `/echo` saw: the method, every header (values grouped by
/// lower-cased name) and the body as text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

pub type Db = Arc<RwLock<Vec<Value>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/xml", get(xml))
        .route("/cookies", get(cookies))
        .route("/cities", get(list_cities).post(create_city))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        grouped
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(Echo {
        method: method.to_string(),
        headers: grouped,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn status(Path(code): Path<u16>) -> Result<StatusCode, StatusCode> {
    StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)
}

async fn xml() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
        "<city><name>Nairobi</name></city>",
    )
}

async fn cookies() -> impl IntoResponse {
    (
        AppendHeaders([
            (header::SET_COOKIE, "session=abc"),
            (header::SET_COOKIE, "theme=dark"),
        ]),
        "",
    )
}

async fn list_cities(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.read().await.clone())
}

async fn create_city(State(db): State<Db>, Json(city): Json<Value>) -> (StatusCode, Json<Value>) {
    db.write().await.push(city.clone());
    (StatusCode::CREATED, Json(city))
}
