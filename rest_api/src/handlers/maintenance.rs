// rest_api/src/handlers/maintenance.rs

use axum::extract::State;

use lib::TicketFilter;
use models::hostel::{MaintenanceTicket, NewTicket, TicketUpdate};
use security::AuthenticatedUser;

use crate::errors::{ApiJson, ApiPath, ApiQuery, RestApiError};
use crate::response::ApiResponse;
use crate::AppState;

pub async fn list_tickets(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiQuery(filter): ApiQuery<TicketFilter>,
) -> Result<ApiResponse<Vec<MaintenanceTicket>>, RestApiError> {
    Ok(ApiResponse::ok("tickets", state.store.list_tickets(&filter)?))
}

pub async fn create_ticket(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiJson(new_ticket): ApiJson<NewTicket>,
) -> Result<ApiResponse<MaintenanceTicket>, RestApiError> {
    Ok(ApiResponse::created("ticket", state.store.create_ticket(new_ticket)?))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<MaintenanceTicket>, RestApiError> {
    Ok(ApiResponse::ok("ticket", state.store.get_ticket(&id)?))
}

pub async fn update_ticket(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<TicketUpdate>,
) -> Result<ApiResponse<MaintenanceTicket>, RestApiError> {
    Ok(ApiResponse::ok("ticket", state.store.update_ticket(&id, update)?))
}

pub async fn delete_ticket(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<MaintenanceTicket>, RestApiError> {
    Ok(ApiResponse::ok("ticket", state.store.delete_ticket(&id)?))
}
