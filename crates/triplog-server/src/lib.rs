//! Triplog Web Server
//!
//! Axum-based REST API for the triplog trip and fuel ledger.
//!
//! Security features:
//! - Access-proxy header or API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Input limits (body size, page size, audit limit)
//! - Audit logging for all API access (reads and writes)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use triplog_core::{Database, Logbook, LogbookConfig, ValidationError};

mod handlers;

/// Maximum request body size for entry writes (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Maximum page size for list endpoints
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Environment variable holding comma-separated API keys
pub const API_KEYS_ENV: &str = "TRIPLOG_API_KEYS";

/// Header set by the fronting access proxy for the authenticated user
const ACCESS_USER_HEADER: &str = "cf-access-authenticated-user-email";

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as `Authorization: Bearer <key>`
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

/// Parse a comma-separated key list, skipping blanks
pub fn parse_api_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// API keys from `TRIPLOG_API_KEYS`, empty when unset
pub fn api_keys_from_env() -> Vec<String> {
    std::env::var(API_KEYS_ENV)
        .map(|v| parse_api_keys(&v))
        .unwrap_or_default()
}

/// Shared application state
pub struct AppState {
    /// Audit log; the same database backs the logbook
    pub db: Database,
    pub logbook: Logbook<Database>,
    pub config: ServerConfig,
}

/// Authentication middleware - accepts the access-proxy user header or a Bearer API key
///
/// # Security Notes
///
/// **Access-proxy header**: `cf-access-authenticated-user-email` is trusted as-is.
/// This is only safe when the server sits behind a proxy that strips or rewrites
/// the header; never expose the server directly with auth relying on it.
///
/// **API keys**: Compared using constant-time comparison to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let proxy_user = request
        .headers()
        .get(ACCESS_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    if let Some(email) = proxy_user {
        info!(user = %email, path = %request.uri().path(), "Authenticated via access proxy header");
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        info!(user = "api-key", path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

/// Extract the caller identity from request headers (for audit logging)
/// Returns the proxy user email, "api-key" for API key auth, or "local-dev" for unauthenticated
pub fn get_user_email(headers: &axum::http::HeaderMap) -> String {
    if let Some(email) = headers
        .get(ACCESS_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        return email.to_string();
    }

    if headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .is_some()
    {
        return "api-key".to_string();
    }

    "local-dev".to_string()
}

/// Create the application router
pub fn create_router(
    db: Database,
    logbook_config: LogbookConfig,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    info!(
        baseline = %logbook_config.baseline,
        km_per_liter = logbook_config.fuel.km_per_liter,
        price_per_liter = logbook_config.fuel.price_per_liter,
        "Logbook configured"
    );

    let state = Arc::new(AppState {
        logbook: Logbook::new(db.clone(), logbook_config),
        db,
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Auth
        .route("/me", get(handlers::get_me))
        // Entries
        .route(
            "/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/entries/:id",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
        .route("/readings", get(handlers::list_readings))
        .route("/odometer/previous", get(handlers::get_previous_odometer))
        // Analytics
        .route("/analytics/summary", get(handlers::get_summary))
        .route("/analytics/series", get(handlers::get_series))
        .route("/analytics/efficiency", get(handlers::get_efficiency))
        // Audit
        .route("/audit", get(handlers::list_audit_log));

    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
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

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    logbook_config: LogbookConfig,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    // Stored distances may be stale if a previous write-back was interrupted
    let book = Logbook::new(db.clone(), logbook_config);
    let entries = book.reconcile()?;
    info!(entries = entries.len(), "Ledger reconciled");

    let app = create_router(db, logbook_config, static_dir, config);
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

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
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

        // User-correctable ledger errors keep their message
        if let Some(validation) = err.downcast_ref::<ValidationError>() {
            return Self::bad_request(&validation.to_string());
        }
        if let Some(core) = err.downcast_ref::<triplog_core::Error>() {
            if core.is_validation() {
                return Self::bad_request(&core.to_string());
            }
            if core.is_not_found() {
                return Self::not_found(&core.to_string());
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
