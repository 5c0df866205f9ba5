//! Authentication middleware
//!
//! `AuthUser` is the single gate every protected route passes through: it
//! validates the bearer token and resolves the claim subject to a live user
//! row. It is side-effect-free and holds no shared mutable state, so it is
//! safe to run concurrently across requests.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use contact_keeper_shared::errors::AuthError;
use axum::{
    extract::FromRef,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};
use uuid::Uuid;

/// Name of the cookie carrying the bearer token
pub const AUTH_COOKIE: &str = "auth_token";

/// Authenticated user resolved from a verified token
///
/// Carries the user record with the password hash stripped; handlers never
/// see credentials.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
}

/// Pull the bearer token out of the request, checking the Authorization
/// header, then the auth cookie, then a `token` query parameter.
pub(crate) fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(header) = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        if let Some(token) = header.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    if let Some(cookies) = parts
        .headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
    {
        for pair in cookies.split(';') {
            if let Some(token) = pair
                .trim()
                .strip_prefix(AUTH_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
            {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    if let Some(query) = parts.uri.query() {
        for pair in query.split('&') {
            if let Some(token) = pair.strip_prefix("token=") {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = extract_token(parts)
            .ok_or_else(|| ApiError::Unauthorized(AuthError::MissingToken.to_string()))?;

        // Uses pre-computed JWT keys from state
        let claims = app_state
            .jwt()
            .validate_token(&token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        // The token may outlive the account; a deleted user is a 404, not a 401
        let user = UserRepository::find_by_id(app_state.db(), user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_for(req: Request<()>) -> Parts {
        req.into_parts().0
    }

    #[test]
    fn test_extracts_bearer_header() {
        let req = Request::builder()
            .uri("/contacts/get-contacts")
            .header("Authorization", "Bearer abc.def.ghi")
            .body(())
            .unwrap();
        assert_eq!(
            extract_token(&parts_for(req)).as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_extracts_cookie_token() {
        let req = Request::builder()
            .uri("/contacts/get-contacts")
            .header("Cookie", "session=x; auth_token=abc.def.ghi")
            .body(())
            .unwrap();
        assert_eq!(
            extract_token(&parts_for(req)).as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_extracts_query_token() {
        let req = Request::builder()
            .uri("/contacts/get-contact?id=1&token=abc.def.ghi")
            .body(())
            .unwrap();
        assert_eq!(
            extract_token(&parts_for(req)).as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_header_takes_precedence_over_cookie() {
        let req = Request::builder()
            .uri("/")
            .header("Authorization", "Bearer from-header")
            .header("Cookie", "auth_token=from-cookie")
            .body(())
            .unwrap();
        assert_eq!(extract_token(&parts_for(req)).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_missing_token_is_none() {
        let req = Request::builder().uri("/").body(()).unwrap();
        assert!(extract_token(&parts_for(req)).is_none());
    }

    #[test]
    fn test_non_bearer_header_ignored() {
        let req = Request::builder()
            .uri("/")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();
        assert!(extract_token(&parts_for(req)).is_none());
    }
}
