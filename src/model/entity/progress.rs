use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Completion record of one student in one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Progress {
    id: Uuid,
    student_id: Uuid,
    course_id: Uuid,
    completed_quizzes: Vec<i32>,
    assignments_completed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressCreate {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

impl ResourceTyped for Progress {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Progress
    }
}

impl Progress {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn completed_quizzes(&self) -> &[i32] {
        &self.completed_quizzes
    }

    pub fn assignments_completed(&self) -> bool {
        self.assignments_completed
    }
}

impl Progress {
    /// Inserts the record for the pair, or returns the one already stored.
    pub async fn create(mm: &ModelManager, data: ProgressCreate) -> DatabaseResult<Self> {
        sqlx::query(
            "INSERT INTO progress (id, student_id, course_id, completed_quizzes, assignments_completed) \
             VALUES ($1,$2,$3,'{}',FALSE) ON CONFLICT (student_id, course_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(data.student_id)
        .bind(data.course_id)
        .execute(mm.executor())
        .await?;

        let progress = sqlx::query_as(
            "SELECT * FROM progress WHERE student_id = $1 AND course_id = $2",
        )
        .bind(data.student_id)
        .bind(data.course_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(progress)
    }

    pub async fn find_by_student_and_course(
        mm: &ModelManager,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM progress WHERE student_id = $1 AND course_id = $2")
                .bind(student_id)
                .bind(course_id)
                .fetch_optional(mm.executor())
                .await?;
        Ok(result)
    }

    /// Adds `quiz_index` to the completed set. Already completed indices are
    /// left untouched.
    pub async fn complete_quiz(mut self, mm: &ModelManager, quiz_index: i32) -> DatabaseResult<Self> {
        let updated: Option<Self> = sqlx::query_as(
            "UPDATE progress SET completed_quizzes = array_append(completed_quizzes, $1) \
             WHERE id = $2 AND NOT ($1 = ANY(completed_quizzes)) RETURNING *",
        )
        .bind(quiz_index)
        .bind(self.id)
        .fetch_optional(mm.executor())
        .await?;

        match updated {
            Some(updated) => Ok(updated),
            None => {
                self.mark_quiz(quiz_index);
                Ok(self)
            }
        }
    }

    pub async fn complete_assignment(mut self, mm: &ModelManager) -> DatabaseResult<Self> {
        sqlx::query("UPDATE progress SET assignments_completed = TRUE WHERE id = $1")
            .bind(self.id)
            .execute(mm.executor())
            .await?;

        self.assignments_completed = true;
        Ok(self)
    }

    fn mark_quiz(&mut self, quiz_index: i32) {
        if !self.completed_quizzes.contains(&quiz_index) {
            self.completed_quizzes.push(quiz_index);
        }
    }
}
