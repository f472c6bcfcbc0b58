//! Plain JSON-over-HTTP proxy for non-MCP callers
//!
//! Exposes the tool registry over four routes. The `/call/:tool` response
//! envelope mirrors the MCP content envelope (`{content: [{type, text}]}`) so
//! a caller can treat both transports uniformly.

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::showcase::ShowcaseService;
use crate::tools;

/// HTTP proxy server bound to one address for the process lifetime.
pub struct HttpProxyApp {
    bind_addr: SocketAddr,
    service: ShowcaseService,
}

impl HttpProxyApp {
    pub fn new(bind_addr: SocketAddr, service: ShowcaseService) -> Self {
        Self { bind_addr, service }
    }

    /// Serves until ctrl-c.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.bind_addr).await?;
        tracing::info!("HTTP proxy listening on http://{}", self.bind_addr);

        axum::serve(listener, build_router(self.service))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;
        Ok(())
    }
}

/// Builds the proxy router. Public so tests can drive it on an ephemeral
/// port.
pub fn build_router(service: ShowcaseService) -> Router {
    Router::new()
        .route("/", get(descriptor))
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/call/:tool", post(call_tool))
        .with_state(service)
}

/// Body of `POST /call/:tool`. An absent or empty body means no arguments.
#[derive(Debug, Default, Deserialize)]
struct CallRequest {
    #[serde(default)]
    args: Map<String, Value>,
}

async fn descriptor(State(service): State<ShowcaseService>) -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "account": service.account(),
        "endpoints": ["GET /health", "GET /tools", "POST /call/:tool"],
    }))
}

async fn health(State(service): State<ShowcaseService>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "account": service.account(),
        "tools": tools::tools().len(),
    }))
}

async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": tools::tool_names() }))
}

async fn call_tool(
    State(service): State<ShowcaseService>,
    Path(tool): Path<String>,
    body: Option<Json<CallRequest>>,
) -> (StatusCode, Json<Value>) {
    let Some(def) = tools::find_tool(&tool) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("unknown tool '{}'", tool),
                "available": tools::tool_names(),
            })),
        );
    };

    let request = body.map(|Json(request)| request).unwrap_or_default();
    match def.invoke(&service, Value::Object(request.args)).await {
        Ok(text) => (
            StatusCode::OK,
            Json(json!({ "content": [{ "type": "text", "text": text }] })),
        ),
        Err(err) => {
            tracing::error!(tool, error = %err, "tool invocation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
        }
    }
}
