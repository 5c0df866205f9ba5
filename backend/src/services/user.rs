//! User service for registration, login, and profile lookup
//!
//! Password hashing/verification runs on the blocking thread pool; the JWT
//! service is passed by reference with its keys already computed.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use contact_keeper_shared::errors::AuthError;
use contact_keeper_shared::types::{AuthToken, LoginRequest, SignupRequest, UserProfile};
use contact_keeper_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// The plaintext password exists only long enough to be hashed; it is
    /// never persisted or echoed back.
    pub async fn register(pool: &PgPool, req: &SignupRequest) -> Result<UserProfile, ApiError> {
        let username = validation::required(&req.username, "username")
            .and_then(|u| validation::validate_username(u).map(|_| u))
            .map_err(ApiError::Validation)?;
        let password = validation::required(&req.password, "password")
            .and_then(|p| validation::validate_password(p).map(|_| p))
            .map_err(ApiError::Validation)?;

        // Email is optional; blank values are treated as absent
        let email = match req.email.as_deref().map(str::trim) {
            Some(e) if !e.is_empty() => {
                validation::validate_email(e).map_err(ApiError::Validation)?;
                Some(e)
            }
            _ => None,
        };

        if UserRepository::username_exists(pool, username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        if let Some(email) = email {
            if UserRepository::email_exists(pool, email)
                .await
                .map_err(ApiError::Internal)?
            {
                return Err(ApiError::Conflict("Email already taken".to_string()));
            }
        }

        // Hash on the blocking pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        // The unique indexes on username/email are the authoritative guard:
        // a duplicate that slips past the fast-path checks while the hash
        // was being computed still surfaces as a conflict, not a 500
        let user = UserRepository::create(pool, username, email, &password_hash).await?;

        Ok(UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        })
    }

    /// Login with username and password, issuing a bearer token
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: &LoginRequest,
    ) -> Result<AuthToken, ApiError> {
        let username = validation::required(&req.username, "username")
            .map_err(ApiError::Validation)?;
        let password = validation::required(&req.password, "password")
            .map_err(ApiError::Validation)?;

        // The same rejection covers an unknown username and a wrong
        // password, so responses cannot be used to enumerate usernames
        let user = UserRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized(AuthError::InvalidCredentials.to_string()))?;

        // Verify on the blocking pool (CPU-intensive)
        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized(
                AuthError::InvalidCredentials.to_string(),
            ));
        }

        let token = jwt_service
            .generate_token(user.id)
            .map_err(ApiError::Internal)?;

        Ok(AuthToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.token_expiry_secs(),
        })
    }

    /// Get user profile
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    // Registration and login need a database - see backend/tests/
}
