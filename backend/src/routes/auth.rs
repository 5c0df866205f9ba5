//! Authentication routes
//!
//! Signup, login, logout, and the current-user lookup. Login returns the
//! bearer token in the body and also sets it as an HttpOnly cookie so
//! browser clients can rely on cookie transport.

use crate::auth::{AuthUser, AUTH_COOKIE};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use contact_keeper_shared::types::{LoginRequest, MessageResponse, SignupRequest, UserProfile};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Register a new user
///
/// POST /auth/signup
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let profile = UserService::register(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Login with username and password
///
/// POST /auth/login
///
/// The issued token is stateless and stays valid until expiry; there is no
/// server-side session to revoke.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let auth = UserService::login(state.db(), state.jwt(), &req).await?;

    let cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        AUTH_COOKIE, auth.token, auth.expires_in
    );

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(auth)))
}

/// Logout
///
/// POST /auth/logout
///
/// Purely a transport action: clears the auth cookie. Any copy of the
/// token the client kept remains valid until natural expiry.
async fn logout() -> impl IntoResponse {
    let cookie = format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", AUTH_COOKIE);

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}

/// Get the current user (requires authentication)
///
/// GET /auth/me
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserProfile>> {
    let profile = UserService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}
