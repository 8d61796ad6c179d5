// rest_api/src/lib.rs

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::FromRef,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Uri,
    },
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use lib::{HostelStore, PaymentGateway, SimulatedGateway};
use security::{RolesConfig, TokenService};

pub mod config;
pub mod errors;
pub mod handlers;
pub mod response;

pub use crate::config::{load_rest_api_config, RestApiConfig};
pub use crate::errors::RestApiError;
pub use crate::response::ApiResponse;

/// Shared state for the Axum application.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Arc<HostelStore>,
    pub tokens: Arc<TokenService>,
    pub roles: Arc<RolesConfig>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(store: HostelStore, config: &RestApiConfig) -> Result<Self, RestApiError> {
        Self::with_gateway(store, config, Arc::new(SimulatedGateway))
    }

    pub fn with_gateway(
        store: HostelStore,
        config: &RestApiConfig,
        payments: Arc<dyn PaymentGateway>,
    ) -> Result<Self, RestApiError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(RestApiError::Config("jwt_secret is empty".into()));
        }
        Ok(Self {
            store: Arc::new(store),
            tokens: Arc::new(TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl())),
            roles: Arc::new(RolesConfig::default()),
            payments,
        })
    }
}

fn cors_layer(allow_any_origin: bool) -> CorsLayer {
    if !allow_any_origin {
        return CorsLayer::new();
    }
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(Any)
}

async fn fallback(uri: Uri) -> RestApiError {
    RestApiError::RouteNotFound(uri.path().to_string())
}

/// Builds the full `/api` router.
pub fn build_router(state: AppState, allow_any_origin: bool) -> Router {
    use handlers::{auth, billing, maintenance, reports, residents, rooms, users};

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/me", get(auth::me))
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/rooms/:id",
            get(rooms::get_room).put(rooms::update_room).delete(rooms::delete_room),
        )
        .route("/rooms/:id/assign", post(rooms::assign_room))
        .route("/rooms/:id/checkout", post(rooms::checkout_room))
        .route("/residents", get(residents::list_residents).post(residents::create_resident))
        .route(
            "/residents/:id",
            get(residents::get_resident)
                .put(residents::update_resident)
                .delete(residents::delete_resident),
        )
        .route("/maintenance", get(maintenance::list_tickets).post(maintenance::create_ticket))
        .route(
            "/maintenance/:id",
            get(maintenance::get_ticket)
                .put(maintenance::update_ticket)
                .delete(maintenance::delete_ticket),
        )
        .route("/billing", get(billing::list_invoices).post(billing::create_invoice))
        .route(
            "/billing/:id",
            get(billing::get_invoice)
                .put(billing::update_invoice)
                .delete(billing::delete_invoice),
        )
        .route("/billing/:id/pay", patch(billing::pay_invoice))
        .route("/reports/summary", get(reports::summary))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        );

    Router::new()
        .nest("/api", api)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allow_any_origin))
        .with_state(state)
}

/// Serves the API until `shutdown` resolves, then flushes the store.
pub async fn start_server(
    config: &RestApiConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let store = Arc::clone(&state.store);
    let app = build_router(state, config.cors_allow_any_origin);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind REST API to {}", address))?;
    info!("Hostel REST API listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("REST API server terminated unexpectedly")?;

    info!("REST API stopped, flushing storage");
    store.flush().await.context("Failed to flush storage on shutdown")?;
    Ok(())
}
