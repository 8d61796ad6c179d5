// rest_api/src/handlers/rooms.rs
//
// `:id` accepts either the room id or its number.

use axum::extract::State;
use tracing::debug;

use lib::{Assignment, Checkout, RoomFilter};
use models::hostel::{NewRoom, ResidentIntake, Room, RoomUpdate};
use security::AuthenticatedUser;

use crate::errors::{ApiJson, ApiPath, ApiQuery, RestApiError};
use crate::response::ApiResponse;
use crate::AppState;

pub async fn list_rooms(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiQuery(filter): ApiQuery<RoomFilter>,
) -> Result<ApiResponse<Vec<Room>>, RestApiError> {
    Ok(ApiResponse::ok("rooms", state.store.list_rooms(&filter)?))
}

pub async fn create_room(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(new_room): ApiJson<NewRoom>,
) -> Result<ApiResponse<Room>, RestApiError> {
    let room = state.store.create_room(new_room)?;
    debug!("{} created room {}", claims.email, room.number);
    Ok(ApiResponse::created("room", room))
}

pub async fn get_room(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(key): ApiPath<String>,
) -> Result<ApiResponse<Room>, RestApiError> {
    Ok(ApiResponse::ok("room", state.store.get_room(&key)?))
}

pub async fn update_room(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(key): ApiPath<String>,
    ApiJson(update): ApiJson<RoomUpdate>,
) -> Result<ApiResponse<Room>, RestApiError> {
    Ok(ApiResponse::ok("room", state.store.update_room(&key, update)?))
}

pub async fn delete_room(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(key): ApiPath<String>,
) -> Result<ApiResponse<Room>, RestApiError> {
    Ok(ApiResponse::ok("room", state.store.delete_room(&key)?))
}

/// Responds with `{ room, resident }`.
pub async fn assign_room(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(key): ApiPath<String>,
    ApiJson(intake): ApiJson<ResidentIntake>,
) -> Result<ApiResponse<Assignment>, RestApiError> {
    let assignment = state.store.assign_room(&key, intake)?;
    debug!("{} assigned {} to room {}", claims.email, assignment.resident.name, assignment.room.number);
    Ok(ApiResponse::fields(assignment))
}

/// Responds with `{ room, released }`.
pub async fn checkout_room(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(key): ApiPath<String>,
) -> Result<ApiResponse<Checkout>, RestApiError> {
    Ok(ApiResponse::fields(state.store.checkout_room(&key)?))
}
