// security/src/middleware.rs
//
// Axum extractors guarding protected routes. The server stays stateless:
// every request carries its bearer token and is verified on its own. The
// token only names the account; role and status are read from storage on
// each request, so disabling or demoting an account takes effect at once.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use lib::HostelStore;
use models::errors::{ErrorKind, HostelError};

use crate::roles::{RolesConfig, MANAGE_USERS};
use crate::{AuthError, Claims, TokenService};

/// Caller identity resolved from `Authorization: Bearer <token>`.
///
/// `email` and `role` reflect the stored account, not the values baked
/// into the token when it was issued.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

/// Caller holding the `manage_users` permission.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

fn refresh_claims(store: &HostelStore, mut claims: Claims) -> Result<Claims, AuthError> {
    let user = match store.get_user(&claims.sub) {
        Ok(user) => user,
        Err(HostelError::NotFound(_)) => {
            return Err(AuthError::InvalidToken("account no longer exists".into()));
        }
        Err(e) => return Err(AuthError::Storage(e.to_string())),
    };
    if !user.is_active() {
        return Err(AuthError::InvalidToken("account is disabled".into()));
    }
    claims.email = user.email;
    claims.role = user.role;
    Ok(claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<TokenService>: FromRef<S>,
    Arc<HostelStore>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        let store = Arc::<HostelStore>::from_ref(state);
        let claims = tokens
            .verify(bearer_token(parts)?)
            .and_then(|claims| refresh_claims(&store, claims))
            .map_err(|e| {
                warn!("Rejected bearer token for {} {}: {}", parts.method, parts.uri.path(), e);
                e
            })?;
        Ok(AuthenticatedUser(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<TokenService>: FromRef<S>,
    Arc<HostelStore>: FromRef<S>,
    Arc<RolesConfig>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
        let roles = Arc::<RolesConfig>::from_ref(state);
        if !roles.has_permission(claims.role, MANAGE_USERS) {
            return Err(AuthError::Forbidden(format!("{} cannot manage staff accounts", claims.role.as_str())));
        }
        Ok(AdminUser(claims))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self.kind() {
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, self.to_string()),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, self.to_string()),
            _ => {
                error!("Authentication subsystem failure: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}
