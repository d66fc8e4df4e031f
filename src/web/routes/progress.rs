use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    model::{
        ResourceTyped,
        entity::{Progress, UserEntity, UserRole},
    },
    web::{
        AppState, WebError, WebResult,
        dto::progress::{CompleteQuizBody, MessageResponse},
        error::ErrorResponse,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route(
            "/progress/{course_id}/{student_username}/",
            get(progress_get_handler),
        )
        .route(
            "/progress/{course_id}/{student_username}/complete_quiz/",
            post(complete_quiz_handler),
        )
        .route(
            "/progress/{course_id}/{student_username}/complete_assignment/",
            post(complete_assignment_handler),
        )
        .with_state(state)
}

/// Resolves the student by name and loads their record for `course_id`.
async fn find_progress(
    state: &AppState,
    course_id: Uuid,
    student_username: &str,
) -> WebResult<Progress> {
    let student =
        UserEntity::find_by_username_and_role(state.mm(), student_username, UserRole::Student)
            .await
            .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?
            .ok_or(WebError::resource_not_found(UserEntity::get_resource_type()))?;

    Progress::find_by_student_and_course(state.mm(), student.id(), course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Progress::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Progress::get_resource_type()))
}

#[utoipa::path(
    get,
    path = "/progress/{course_id}/{student_username}/",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("student_username" = String, Path, description = "Student username"),
    ),
    responses(
        (status = 200, description = "Progress found", body = Progress),
        (status = 404, description = "Student or progress not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "progress"
)]
pub async fn progress_get_handler(
    State(state): State<AppState>,
    Path((course_id, student_username)): Path<(Uuid, String)>,
) -> WebResult<impl IntoResponse> {
    let progress = find_progress(&state, course_id, &student_username).await?;
    Ok((StatusCode::OK, Json(progress)))
}

#[utoipa::path(
    post,
    path = "/progress/{course_id}/{student_username}/complete_quiz/",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("student_username" = String, Path, description = "Student username"),
    ),
    request_body = CompleteQuizBody,
    responses(
        (status = 200, description = "Quiz marked complete", body = MessageResponse),
        (status = 404, description = "Student or progress not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "progress"
)]
#[tracing::instrument(skip(state))]
pub async fn complete_quiz_handler(
    State(state): State<AppState>,
    Path((course_id, student_username)): Path<(Uuid, String)>,
    Json(payload): Json<CompleteQuizBody>,
) -> WebResult<impl IntoResponse> {
    let progress = find_progress(&state, course_id, &student_username).await?;

    let progress = progress
        .complete_quiz(state.mm(), payload.quiz_index)
        .await
        .map_err(|e| WebError::resource_fetch_error(Progress::get_resource_type(), e))?;

    tracing::debug!(completed = ?progress.completed_quizzes(), "quiz marked complete");
    Ok((StatusCode::OK, Json(MessageResponse::new("Quiz marked complete"))))
}

#[utoipa::path(
    post,
    path = "/progress/{course_id}/{student_username}/complete_assignment/",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("student_username" = String, Path, description = "Student username"),
    ),
    responses(
        (status = 200, description = "Assignment marked complete", body = MessageResponse),
        (status = 404, description = "Student or progress not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "progress"
)]
#[tracing::instrument(skip(state))]
pub async fn complete_assignment_handler(
    State(state): State<AppState>,
    Path((course_id, student_username)): Path<(Uuid, String)>,
) -> WebResult<impl IntoResponse> {
    let progress = find_progress(&state, course_id, &student_username).await?;

    progress
        .complete_assignment(state.mm())
        .await
        .map_err(|e| WebError::resource_fetch_error(Progress::get_resource_type(), e))?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Assignment marked complete")),
    ))
}
