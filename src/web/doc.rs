use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Educational Platform Backend"),
    paths(
        crate::web::routes::users::user_create_handler,
        crate::web::routes::courses::course_create_handler,
        crate::web::routes::courses::courses_list_handler,
        crate::web::routes::courses::course_get_handler,
        crate::web::routes::courses::quiz_add_handler,
        crate::web::routes::courses::enroll_handler,
        crate::web::routes::progress::progress_get_handler,
        crate::web::routes::progress::complete_quiz_handler,
        crate::web::routes::progress::complete_assignment_handler,
    ),
    tags(
        (name = "users", description = "Student and instructor registration"),
        (name = "courses", description = "Course authoring and enrollment"),
        (name = "progress", description = "Per-student course progress"),
    )
)]
pub struct ApiDoc;
