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
        CrudRepository, ResourceType, ResourceTyped, has_role,
        entity::{Course, CourseCreate, Progress, ProgressCreate, QuizQuestion, UserEntity, UserRole},
    },
    web::{
        AppState, WebError, WebResult,
        dto::courses::{CourseCreateBody, EnrollBody},
        error::ErrorResponse,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route(
            "/courses/",
            get(courses_list_handler).post(course_create_handler),
        )
        .route("/courses/{course_id}/", get(course_get_handler))
        .route("/courses/{course_id}/quizzes/", post(quiz_add_handler))
        .route("/courses/{course_id}/enroll/", post(enroll_handler))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/courses/",
    request_body = CourseCreateBody,
    description = "Creates a course owned by the given instructor",
    responses(
        (status = 200, description = "Course created", body = Course),
        (status = 403, description = "Username does not belong to an instructor", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "courses"
)]
#[tracing::instrument(skip(state))]
pub async fn course_create_handler(
    State(state): State<AppState>,
    Json(payload): Json<CourseCreateBody>,
) -> WebResult<impl IntoResponse> {
    let instructor = UserEntity::find_by_username(state.mm(), &payload.instructor_username)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?
        .ok_or(WebError::role_required(UserRole::Instructor))?;

    if !has_role(&instructor, UserRole::Instructor) {
        return Err(WebError::role_required(UserRole::Instructor));
    }

    let created = Course::create(
        state.mm(),
        CourseCreate {
            title: payload.title,
            description: payload.description,
            instructor_id: instructor.id(),
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    tracing::info!(course_id = %created.id(), instructor_id = %instructor.id(), "course created");
    Ok((StatusCode::OK, Json(created)))
}

#[utoipa::path(
    get,
    path = "/courses/",
    description = "Lists ALL courses with their quizzes",
    responses(
        (status = 200, description = "Successfully collected courses", body = Vec<Course>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn courses_list_handler(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let courses = Course::list(state.mm())
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(courses)))
}

#[utoipa::path(
    get,
    path = "/courses/{course_id}/",
    params(("course_id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn course_get_handler(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let course = Course::find_by_id(state.mm(), course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Course::get_resource_type()))?;

    Ok((StatusCode::OK, Json(course)))
}

#[utoipa::path(
    post,
    path = "/courses/{course_id}/quizzes/",
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = QuizQuestion,
    description = "Appends a quiz question to the course and returns the updated course",
    responses(
        (status = 200, description = "Quiz appended", body = Course),
        (status = 400, description = "Quiz question is malformed", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "courses"
)]
#[tracing::instrument(skip(state))]
pub async fn quiz_add_handler(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(quiz): Json<QuizQuestion>,
) -> WebResult<impl IntoResponse> {
    quiz.validate()
        .map_err(|e| WebError::resource_bad_request(ResourceType::Quiz, e.to_string()))?;

    let updated = Course::append_quiz(state.mm(), course_id, quiz)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Course::get_resource_type()))?;

    tracing::debug!(quizzes = updated.quizzes().len(), "quiz appended");
    Ok((StatusCode::OK, Json(updated)))
}

#[utoipa::path(
    post,
    path = "/courses/{course_id}/enroll/",
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = EnrollBody,
    description = "Enrolls a student. Returns the existing progress if the student is already enrolled",
    responses(
        (status = 200, description = "Student enrolled", body = Progress),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "courses"
)]
#[tracing::instrument(skip(state))]
pub async fn enroll_handler(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<EnrollBody>,
) -> WebResult<impl IntoResponse> {
    let student = UserEntity::find_by_username_and_role(
        state.mm(),
        &payload.student_username,
        UserRole::Student,
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?
    .ok_or(WebError::resource_not_found(UserEntity::get_resource_type()))?;

    let course = Course::find_by_id(state.mm(), course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Course::get_resource_type()))?;

    let existing = Progress::find_by_student_and_course(state.mm(), student.id(), course.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Progress::get_resource_type(), e))?;

    if let Some(progress) = existing {
        tracing::debug!(progress_id = %progress.id(), "student already enrolled");
        return Ok((StatusCode::OK, Json(progress)));
    }

    let progress = Progress::create(
        state.mm(),
        ProgressCreate {
            student_id: student.id(),
            course_id: course.id(),
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(Progress::get_resource_type(), e))?;

    tracing::info!(progress_id = %progress.id(), student_id = %student.id(), "student enrolled");
    Ok((StatusCode::OK, Json(progress)))
}
