use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use thiserror::Error;
use uuid::Uuid;

/// Question embedded in a course, addressed by its position in `Course::quizzes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: i32,
}

#[derive(Debug, Error, PartialEq)]
pub enum QuizError {
    #[error("quiz question must have at least one option")]
    NoOptions,
    #[error("correct option index {index} is out of range for {len} options")]
    CorrectOptionOutOfRange { index: i32, len: usize },
}

impl QuizQuestion {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.options.is_empty() {
            return Err(QuizError::NoOptions);
        }

        let in_range = usize::try_from(self.correct_option_index)
            .is_ok_and(|idx| idx < self.options.len());
        if !in_range {
            return Err(QuizError::CorrectOptionOutOfRange {
                index: self.correct_option_index,
                len: self.options.len(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Course {
    id: Uuid,
    title: String,
    description: Option<String>,
    instructor_id: Uuid,
    #[sqlx(json)]
    quizzes: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CourseCreate {
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Course
    }
}

impl Course {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn instructor_id(&self) -> Uuid {
        self.instructor_id
    }

    pub fn quizzes(&self) -> &[QuizQuestion] {
        &self.quizzes
    }
}

#[async_trait]
impl CrudRepository<Course, CourseCreate, Uuid> for Course {
    async fn create(mm: &ModelManager, data: CourseCreate) -> DatabaseResult<Self> {
        let course = sqlx::query_as(
            "INSERT INTO courses (id, title, description, instructor_id, quizzes) \
             VALUES ($1,$2,$3,$4,'[]'::jsonb) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.instructor_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(course)
    }

    async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }

        Ok(Some(result?))
    }

    async fn list(mm: &ModelManager) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM courses")
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Course {
    /// Appends `quiz` to the end of the course's question list.
    ///
    /// Returns `None` when no course with `id` exists. The append happens in a
    /// single `UPDATE`, so concurrent appends never lose questions.
    pub async fn append_quiz(
        mm: &ModelManager,
        id: Uuid,
        quiz: QuizQuestion,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as(
            "UPDATE courses SET quizzes = quizzes || $1::jsonb WHERE id = $2 RETURNING *",
        )
        .bind(Json(vec![quiz]))
        .bind(id)
        .fetch_optional(mm.executor())
        .await?;

        Ok(result)
    }
}
