// rest_api/src/handlers/billing.rs
//
// Statuses are evaluated against today's date on the way out, so a
// pending invoice past its due date is reported as Overdue.

use axum::{body::Bytes, extract::State};
use chrono::{NaiveDate, Utc};

use lib::{InvoiceFilter, PaymentRequest};
use models::hostel::{Invoice, InvoiceUpdate, NewInvoice};
use security::AuthenticatedUser;

use crate::errors::{ApiJson, ApiPath, ApiQuery, RestApiError};
use crate::response::ApiResponse;
use crate::AppState;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn list_invoices(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiQuery(filter): ApiQuery<InvoiceFilter>,
) -> Result<ApiResponse<Vec<Invoice>>, RestApiError> {
    Ok(ApiResponse::ok("invoices", state.store.list_invoices(&filter, today())?))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiJson(new_invoice): ApiJson<NewInvoice>,
) -> Result<ApiResponse<Invoice>, RestApiError> {
    let invoice = state.store.create_invoice(new_invoice)?;
    Ok(ApiResponse::created("invoice", invoice.evaluated(today())))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<Invoice>, RestApiError> {
    Ok(ApiResponse::ok("invoice", state.store.get_invoice(&id)?.evaluated(today())))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<InvoiceUpdate>,
) -> Result<ApiResponse<Invoice>, RestApiError> {
    let invoice = state.store.update_invoice(&id, update)?;
    Ok(ApiResponse::ok("invoice", invoice.evaluated(today())))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<ApiResponse<Invoice>, RestApiError> {
    Ok(ApiResponse::ok("invoice", state.store.delete_invoice(&id)?))
}

pub async fn pay_invoice(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
    body: Bytes,
) -> Result<ApiResponse<Invoice>, RestApiError> {
    // An empty body pays with the default method.
    let request: PaymentRequest = if body.is_empty() {
        PaymentRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| RestApiError::InvalidInput(e.to_string()))?
    };
    let invoice = lib::pay_invoice(&state.store, state.payments.as_ref(), &id, request).await?;
    Ok(ApiResponse::ok("invoice", invoice))
}
