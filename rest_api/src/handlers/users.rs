// rest_api/src/handlers/users.rs
//
// Staff account administration. Every route requires `manage_users`, and
// an admin cannot disable, demote or delete their own account.

use axum::extract::State;
use chrono::Utc;
use tracing::info;

use lib::UserFilter;
use models::hostel::{NewUser, User, UserProfile, UserUpdate};
use security::{hash_password, AdminUser};

use crate::errors::{ApiJson, ApiPath, ApiQuery, RestApiError};
use crate::response::ApiResponse;
use crate::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> Result<ApiResponse<Vec<UserProfile>>, RestApiError> {
    let users = state.store.list_users(&filter)?;
    Ok(ApiResponse::ok("users", users.iter().map(UserProfile::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    ApiJson(new_user): ApiJson<NewUser>,
) -> Result<ApiResponse<UserProfile>, RestApiError> {
    let password_hash = hash_password(new_user.validate()?)?;
    let user = state.store.add_user(User::from_new_user(new_user, password_hash, Utc::now())?)?;
    info!("{} created account {} ({})", claims.email, user.email, user.role.as_str());
    Ok(ApiResponse::created("user", user.profile()))
}

pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<UserProfile>, RestApiError> {
    Ok(ApiResponse::ok("user", state.store.get_user(&id)?.profile()))
}

pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<ApiResponse<UserProfile>, RestApiError> {
    let password_hash = match update.validate()? {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let user = state.store.update_user(&id, update, password_hash, &claims.sub)?;
    Ok(ApiResponse::ok("user", user.profile()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<UserProfile>, RestApiError> {
    let user = state.store.delete_user(&id, &claims.sub)?;
    info!("{} deleted account {}", claims.email, user.email);
    Ok(ApiResponse::ok("user", user.profile()))
}
