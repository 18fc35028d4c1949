//! Shell handlers
//!
//! The page itself, its menu description and the health check.

use crate::ui::{Menu, INDEX_HTML};
use axum::response::{Html, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// "healthy" when the server is up
    pub status: String,
    /// Crate version
    pub version: String,
}

/// GET / - The single-page UI
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/menu - Sidebar description
pub async fn menu() -> Json<Menu> {
    Json(Menu::default())
}

/// GET /api/health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
