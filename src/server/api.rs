use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::dispatch::DispatchContext;
use crate::errors::DispatchError;
use crate::spec::{CommandRegistry, NodeType};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub ctx: DispatchContext,
    /// Source re-read by `POST /reload`
    pub command_file: PathBuf,
}

pub type SharedState = Arc<AppState>;

// ── Payload types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    pub command: String,
    pub node_type: String,
    pub node_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSummary {
    pub name: String,
    pub help: String,
    pub default_usage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandList {
    pub commands: Vec<CommandSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeList {
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetDump {
    pub ue: Vec<String>,
    pub gnb: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({"error": message}))).into_response()
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::UnknownNodeType(_) => ApiError::BadRequest("Invalid node type".into()),
            DispatchError::NoTargets => ApiError::BadRequest(err.to_string()),
            DispatchError::UnknownNode { .. } | DispatchError::CommandNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}

fn parse_node_type(raw: &str) -> Result<NodeType, ApiError> {
    raw.parse::<NodeType>().map_err(ApiError::from)
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/connect", get(connect))
        .route("/dump", get(dump_all))
        .route("/dump/{node_type}", get(dump_nodes))
        .route("/commands/{node_type}", get(list_commands))
        .route("/check/{node_type}/{node_name}", get(check_node))
        .route("/command", post(run_command))
        .route("/reload", post(reload))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn connect() -> Json<serde_json::Value> {
    Json(json!({
        "status": "Connected successfully",
        "objects": {
            "ue": NodeType::Ue.label(),
            "gnb": NodeType::Gnb.label(),
        }
    }))
}

async fn dump_all(State(state): State<SharedState>) -> Json<FleetDump> {
    let directory = state.ctx.directory();
    Json(FleetDump {
        ue: directory.list_all(NodeType::Ue).await,
        gnb: directory.list_all(NodeType::Gnb).await,
    })
}

async fn dump_nodes(
    State(state): State<SharedState>,
    Path(node_type): Path<String>,
) -> Result<Json<NodeList>, ApiError> {
    let node_type = parse_node_type(&node_type)?;
    let nodes = state.ctx.directory().list_all(node_type).await;
    Ok(Json(NodeList { nodes }))
}

async fn list_commands(
    State(state): State<SharedState>,
    Path(node_type): Path<String>,
) -> Result<Json<CommandList>, ApiError> {
    let node_type = parse_node_type(&node_type)?;
    let snapshot = state.ctx.snapshot().await;
    let commands = snapshot
        .registry()
        .commands_for(node_type)
        .iter()
        .map(|c| CommandSummary {
            name: c.name.clone(),
            help: c.help.clone(),
            default_usage: c.default_usage.clone(),
        })
        .collect();
    Ok(Json(CommandList { commands }))
}

async fn check_node(
    State(state): State<SharedState>,
    Path((node_type, node_name)): Path<(String, String)>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let node_type = parse_node_type(&node_type)?;
    let exists = state.ctx.directory().exists(node_type, &node_name).await;
    Ok(Json(ExistsResponse { exists }))
}

async fn run_command(
    State(state): State<SharedState>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let node_type = parse_node_type(&request.node_type)?;

    let aggregated = state
        .ctx
        .run_command(node_type, &request.command, &request.node_name)
        .await?;

    Ok(Json(CommandResponse {
        response: aggregated.into_text(),
    }))
}

async fn reload(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    let registry = CommandRegistry::load(&state.command_file).map_err(|e| {
        tracing::error!(error = %e, "reload rejected; keeping current commands");
        ApiError::Internal(e.to_string())
    })?;

    let counts = json!({
        "ue": registry.commands_for(NodeType::Ue).len(),
        "gnb": registry.commands_for(NodeType::Gnb).len(),
    });
    state.ctx.reload(registry).await;

    Ok(Json(json!({"status": "Reloaded", "commands": counts})))
}

async fn health_check() -> &'static str {
    "ok"
}
