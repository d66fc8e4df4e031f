use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};

use crate::{
    model::{
        CrudRepository, ResourceTyped,
        entity::{UserEntity, UserEntityCreate},
    },
    web::{AppState, WebError, WebResult, dto::users::UserCreateBody, error::ErrorResponse},
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/users/", post(user_create_handler))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserCreateBody,
    description = "Registers a new student or instructor",
    responses(
        (status = 200, description = "User created successfully", body = UserEntity),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "users"
)]
#[tracing::instrument(skip(state))]
pub async fn user_create_handler(
    State(state): State<AppState>,
    Json(payload): Json<UserCreateBody>,
) -> WebResult<impl IntoResponse> {
    let found = UserEntity::find_by_username(state.mm(), &payload.username)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    if found.is_some() {
        return Err(WebError::registration_conflict());
    }

    let payload = UserEntityCreate {
        username: payload.username,
        is_instructor: payload.is_instructor,
    };

    // the unique index still catches a registration racing this one
    let created = UserEntity::create(state.mm(), payload)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                WebError::registration_conflict()
            } else {
                WebError::resource_fetch_error(UserEntity::get_resource_type(), e)
            }
        })?;

    tracing::info!(user_id = %created.id(), role = %created.role(), "user registered");
    Ok((StatusCode::OK, Json(created)))
}
