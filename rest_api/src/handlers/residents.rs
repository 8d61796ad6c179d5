// rest_api/src/handlers/residents.rs

use axum::extract::State;

use lib::ResidentFilter;
use models::hostel::{NewResident, Resident, ResidentUpdate};
use security::AuthenticatedUser;

use crate::errors::{ApiJson, ApiPath, ApiQuery, RestApiError};
use crate::response::ApiResponse;
use crate::AppState;

pub async fn list_residents(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiQuery(filter): ApiQuery<ResidentFilter>,
) -> Result<ApiResponse<Vec<Resident>>, RestApiError> {
    Ok(ApiResponse::ok("residents", state.store.list_residents(&filter)?))
}

pub async fn create_resident(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiJson(new_resident): ApiJson<NewResident>,
) -> Result<ApiResponse<Resident>, RestApiError> {
    Ok(ApiResponse::created("resident", state.store.create_resident(new_resident)?))
}

pub async fn get_resident(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<Resident>, RestApiError> {
    Ok(ApiResponse::ok("resident", state.store.get_resident(&id)?))
}

pub async fn update_resident(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<ResidentUpdate>,
) -> Result<ApiResponse<Resident>, RestApiError> {
    Ok(ApiResponse::ok("resident", state.store.update_resident(&id, update)?))
}

pub async fn delete_resident(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<Resident>, RestApiError> {
    Ok(ApiResponse::ok("resident", state.store.delete_resident(&id)?))
}
