//! Sanket Web Server
//!
//! Axum-based REST API for the Sanket spreadsheet enrichment tool.
//!
//! The server owns one in-memory [`Session`]: uploading a spreadsheet
//! replaces the previous row set, merging recomputes the full output, and
//! the preview/export endpoints read whatever was merged last. Reference
//! tables are loaded once at startup.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use sanket_core::Session;

mod handlers;

/// Maximum spreadsheet upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// The one logical enrichment session; there is a single logical thread
    /// of control, so a plain mutex is enough.
    pub session: Mutex<Session>,
    pub config: ServerConfig,
}

impl AppState {
    fn session(&self) -> Result<MutexGuard<'_, Session>, AppError> {
        self.session
            .lock()
            .map_err(|_| AppError::internal("session lock poisoned"))
    }
}

/// Build the application router.
pub fn create_router(session: Session, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        session: Mutex::new(session),
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Upload and merge
        .route("/upload", post(handlers::upload_workbook))
        .route("/merge", post(handlers::run_merge))
        // Merged output
        .route("/preview", get(handlers::preview))
        .route("/rows", get(handlers::list_rows))
        .route("/export", get(handlers::export_rows))
        // Diagnostics
        .route("/reference", get(handlers::reference_status));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    // CSP: same-origin scripts only; the built-in page has no external assets
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve a provided frontend, or fall back to the built-in upload page
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    } else {
        app = app.route("/", get(index_page));
    }

    app
}

/// Built-in single-page frontend for local use.
async fn index_page() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Start the server
pub async fn serve(
    session: Session,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(session, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
