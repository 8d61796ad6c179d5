// rest_api/src/handlers/auth.rs
//
// Login and self-registration. Tokens carry the account id; every
// protected request is verified on its own.

use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use models::errors::HostelError;
use models::hostel::{NewUser, Role, User, UserProfile};
use security::{hash_password, verify_password, AuthError, AuthenticatedUser};

use crate::errors::{ApiJson, RestApiError};
use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

fn session(state: &AppState, user: &User) -> Result<AuthSession, RestApiError> {
    Ok(AuthSession { token: state.tokens.issue(user)?, user: user.profile() })
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<ApiResponse<AuthSession>, RestApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(HostelError::validation("email and password are required").into());
    }

    let user = match state.store.get_user_by_email(&request.email)? {
        Some(user) => user,
        None => {
            warn!("Login attempt for unknown account {}", request.email);
            return Err(AuthError::InvalidCredentials.into());
        }
    };
    if !verify_password(&request.password, &user.password_hash)? {
        warn!("Wrong password for {}", user.email);
        return Err(AuthError::InvalidCredentials.into());
    }
    if !user.is_active() {
        return Err(AuthError::AccountDisabled.into());
    }

    info!("{} logged in", user.email);
    Ok(ApiResponse::fields(session(&state, &user)?))
}

/// The first account becomes Admin; later ones are Staff.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<ApiResponse<AuthSession>, RestApiError> {
    let role = if state.store.has_users() { Role::Staff } else { Role::Admin };
    let new_user = NewUser {
        name: request.name,
        email: request.email,
        password: request.password,
        role: Some(role),
        status: None,
    };
    let password_hash = hash_password(new_user.validate()?)?;
    let user = state.store.add_user(User::from_new_user(new_user, password_hash, Utc::now())?)?;

    info!("Registered {} as {}", user.email, user.role.as_str());
    Ok(ApiResponse::fields(session(&state, &user)?).with_status(StatusCode::CREATED))
}

/// The account behind the bearer token. The extractor has already
/// rejected deleted and disabled accounts.
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<ApiResponse<UserProfile>, RestApiError> {
    Ok(ApiResponse::ok("user", state.store.get_user(&claims.sub)?.profile()))
}
