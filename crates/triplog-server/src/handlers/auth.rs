//! Authentication-related handlers

use axum::{extract::Request, Json};
use serde::Serialize;

use crate::get_user_email;

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// The authenticated user's email or identifier
    pub user: String,
    /// How the user was authenticated
    pub auth_method: String,
}

/// Get the currently authenticated user
pub async fn get_me(request: Request) -> Json<MeResponse> {
    let user = get_user_email(request.headers());

    let auth_method = match user.as_str() {
        "api-key" => "api_key",
        "local-dev" => "none",
        _ => "access_proxy",
    };

    Json(MeResponse {
        user,
        auth_method: auth_method.to_string(),
    })
}
