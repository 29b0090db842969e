//! Auth middleware
//!
//! Axum middleware guarding the `/api` surface: JWT authentication, admin
//! gating, and the maintenance-mode lockout.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::system_config;
use crate::utils::AppError;

/// Paths reachable without a token.
fn is_public_api_route(path: &str) -> bool {
    path == "/api/auth/login" || path == "/api/health"
}

/// Require a valid bearer token on `/api` routes.
///
/// Skips OPTIONS (CORS preflight), non-API paths, and the public routes.
/// On success the [`CurrentUser`] lands in request extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }
    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(AppError::invalid_token)?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "Token validation failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// Require an admin-grade role on the authenticated caller.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;
    if !user.is_admin() {
        tracing::warn!(
            user_id = %user.id,
            role = %user.role,
            uri = %req.uri(),
            "Admin route denied"
        );
        return Err(AppError::forbidden("Administrator role required"));
    }
    Ok(next.run(req).await)
}

/// Maintenance lockout: while the flag is set, mutating API calls return 503.
/// Reads still work, and config/auth routes stay open so an admin can turn
/// the flag back off.
pub async fn maintenance_guard(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    let mutating = matches!(
        *req.method(),
        http::Method::POST | http::Method::PUT | http::Method::PATCH | http::Method::DELETE
    );

    let exempt = !path.starts_with("/api/")
        || path.starts_with("/api/auth/")
        || path.starts_with("/api/config");

    if mutating && !exempt {
        let config = system_config::get(state.pool()).await?;
        if config.maintenance_mode {
            return Err(AppError::Maintenance);
        }
    }

    Ok(next.run(req).await)
}
