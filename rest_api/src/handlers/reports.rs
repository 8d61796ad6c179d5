// rest_api/src/handlers/reports.rs

use axum::extract::State;
use chrono::Utc;

use lib::HostelSummary;
use security::AuthenticatedUser;

use crate::errors::RestApiError;
use crate::response::ApiResponse;
use crate::AppState;

pub async fn summary(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<ApiResponse<HostelSummary>, RestApiError> {
    Ok(ApiResponse::ok("summary", state.store.summary(Utc::now().date_naive())?))
}
