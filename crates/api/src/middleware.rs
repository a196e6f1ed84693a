use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use userdir_auth::TokenVerifier;
use userdir_store::UserStore;

use crate::app::errors::{self, ApiError};
use crate::context::CurrentUser;

/// Everything the authorization guard needs, handed in at router
/// construction.
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub users: Arc<dyn UserStore>,
}

/// Bearer-token guard for protected routes.
///
/// Rejections (missing token, failed verification, unknown subject) terminate
/// here as 401 responses. A store failure during subject lookup is not an
/// authorization outcome and propagates to the shared error path instead.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer(req.headers()) else {
        return Ok(errors::unauthorized("Unauthorised, token is needed", None));
    };

    let claims = match state.verifier.verify(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            return Ok(errors::unauthorized(
                "Unauthorised, token is invalid",
                Some(e.to_string()),
            ));
        }
    };

    let Some(user) = state.users.find_by_id(&claims.sub).await? else {
        return Ok(errors::unauthorized("Unauthorised, user is not found", None));
    };

    req.extensions_mut().insert(CurrentUser::new(user));
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}
