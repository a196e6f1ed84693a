//! HTTP application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: store selection and the service layer behind the handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response DTOs and the success envelope
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use userdir_auth::Hs256TokenVerifier;
use userdir_store::UserStore;

use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// The signing secret is passed in explicitly; nothing inside the router
/// reads process environment.
pub fn build_app(users: Arc<dyn UserStore>, jwt_secret: &str) -> Router {
    let auth_state = AuthState {
        verifier: Arc::new(Hs256TokenVerifier::new(jwt_secret)),
        users: Arc::clone(&users),
    };

    let services = Arc::new(services::AppServices::new(users));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/users", routes::users::router(auth_state))
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
