use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CourseCreateBody {
    pub title: String,
    pub description: Option<String>,
    /// Username of the instructor who will own the course
    pub instructor_username: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EnrollBody {
    pub student_username: String,
}
