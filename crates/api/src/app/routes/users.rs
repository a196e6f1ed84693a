use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use userdir_core::UserId;

use crate::app::dto::{Envelope, UserResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::CurrentUser;
use crate::middleware::{auth_middleware, AuthState};

/// User resource routes.
///
/// Only the by-id read is guarded; the listing and the write stubs are open,
/// and the stubs acknowledge without persisting anything.
pub fn router(auth: AuthState) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .route_layer(axum::middleware::from_fn_with_state(auth, auth_middleware))
                .put(update_user)
                .delete(delete_user),
        )
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = services.list_users().await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(Envelope::ok(data)))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(requested_by = %current.user().id, "get user");

    let id: UserId = id.parse()?;

    // Absence is not an error for this endpoint: the payload is just null.
    let data = services.get_user(&id).await?.map(UserResponse::from);

    Ok(Json(Envelope::ok(data)))
}

pub async fn create_user() -> impl IntoResponse {
    Json(json!({ "title": "CREATE new user" }))
}

pub async fn update_user(Path(_id): Path<String>) -> impl IntoResponse {
    Json(json!({ "title": "UPDATE user" }))
}

pub async fn delete_user(Path(_id): Path<String>) -> impl IntoResponse {
    Json(json!({ "title": "DELETE user" }))
}
