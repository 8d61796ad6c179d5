// rest_api/src/handlers/mod.rs

use serde::Serialize;

use crate::response::ApiResponse;

pub mod auth;
pub mod billing;
pub mod maintenance;
pub mod reports;
pub mod residents;
pub mod rooms;
pub mod users;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> ApiResponse<Health> {
    ApiResponse::fields(Health { status: "healthy", version: env!("CARGO_PKG_VERSION") })
}
