//! User endpoints
//!
//! One handler per operation, each issuing exactly one statement through
//! [`UserRepo`]. Update and delete answer success whether or not a row
//! matched the id.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::db::{Row, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{UserId, ValidUser};
use crate::http::server::AppState;
use crate::models::{UpdatedUser, User};

/// GET /users - every row, unordered and unpaginated
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = UserRepo::new(state.connector.as_ref()).list().await?;
    Ok(Json(rows))
}

/// POST /users - insert and echo with the generated id
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidUser(fields): ValidUser,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = UserRepo::new(state.connector.as_ref()).create(fields).await?;
    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id} - replace name and email, echo the path id as sent
async fn update_user(
    State(state): State<Arc<AppState>>,
    UserId { id, raw }: UserId,
    ValidUser(fields): ValidUser,
) -> Result<Json<UpdatedUser>, ApiError> {
    UserRepo::new(state.connector.as_ref())
        .update(id, &fields)
        .await?;
    Ok(Json(UpdatedUser::new(raw, fields)))
}

/// DELETE /users/{id} - 204 with an empty body
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserId { id, .. }: UserId,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(state.connector.as_ref()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}
