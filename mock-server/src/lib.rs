use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Credentials accepted by the `/protected` page.
pub const DEMO_USER: &str = "admin";
pub const DEMO_PASSWORD: &str = "deploy-me";

/// Placeholder page body, as served by the platform for a new site.
pub const WELCOME_PAGE: &str =
    "<html><body><h1>This web site has been successfully created</h1></body></html>";

pub const PROTECTED_PAGE: &str = "<html><body>deployment dashboard</body></html>";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateLogEntry {
    pub message: String,
}

/// One deployment's log: top-level entries plus per-entry detail lists.
#[derive(Clone, Debug, Default)]
pub struct Deployment {
    pub entries: Vec<LogEntry>,
    pub details: HashMap<String, Vec<LogEntry>>,
}

pub type Db = Arc<RwLock<HashMap<String, Deployment>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/", get(welcome))
        .route("/protected", get(protected))
        .route("/echo", post(echo))
        .route("/echo/headers", get(echo_headers).post(echo_headers))
        .route("/deployments/{id}", post(create_deployment))
        .route(
            "/deployments/{id}/log",
            get(list_log_entries).post(append_log_entry),
        )
        .route(
            "/deployments/{id}/log/{entry_id}",
            get(list_entry_details).post(append_entry_detail),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

async fn protected(headers: HeaderMap) -> Result<Html<&'static str>, StatusCode> {
    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("{DEMO_USER}:{DEMO_PASSWORD}"))
    );
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value.as_bytes() == expected.as_bytes() => Ok(Html(PROTECTED_PAGE)),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn echo(body: String) -> String {
    body
}

/// Reflect the request headers clients are expected to send, so tests
/// can observe them on the wire.
async fn echo_headers(headers: HeaderMap, body: String) -> String {
    let mut lines = Vec::new();
    for name in [header::USER_AGENT, header::CONTENT_TYPE] {
        if let Some(value) = headers.get(&name).and_then(|v| v.to_str().ok()) {
            lines.push(format!("{name}: {value}"));
        }
    }
    lines.push(body);
    lines.join("\n")
}

async fn create_deployment(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    db.write().await.entry(id).or_default();
    StatusCode::CREATED
}

async fn list_log_entries(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    let deployments = db.read().await;
    deployments
        .get(&id)
        .map(|d| Json(d.entries.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn append_log_entry(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<CreateLogEntry>,
) -> (StatusCode, Json<LogEntry>) {
    let entry = LogEntry {
        id: Uuid::new_v4().to_string(),
        message: input.message,
        details_url: None,
    };
    let mut deployments = db.write().await;
    deployments.entry(id).or_default().entries.push(entry.clone());
    (StatusCode::CREATED, Json(entry))
}

async fn list_entry_details(
    State(db): State<Db>,
    Path((id, entry_id)): Path<(String, String)>,
) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    let deployments = db.read().await;
    let deployment = deployments.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    if !deployment.entries.iter().any(|e| e.id == entry_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(
        deployment.details.get(&entry_id).cloned().unwrap_or_default(),
    ))
}

async fn append_entry_detail(
    State(db): State<Db>,
    Path((id, entry_id)): Path<(String, String)>,
    Json(input): Json<CreateLogEntry>,
) -> Result<(StatusCode, Json<LogEntry>), StatusCode> {
    let mut deployments = db.write().await;
    let deployment = deployments.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let parent = deployment
        .entries
        .iter_mut()
        .find(|e| e.id == entry_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    parent.details_url = Some(format!("/deployments/{id}/log/{entry_id}"));

    let detail = LogEntry {
        id: Uuid::new_v4().to_string(),
        message: input.message,
        details_url: None,
    };
    deployment
        .details
        .entry(entry_id)
        .or_default()
        .push(detail.clone());
    Ok((StatusCode::CREATED, Json(detail)))
}
