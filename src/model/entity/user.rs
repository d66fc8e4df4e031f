use crate::model::repo::ResourceTyped;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::prelude::Row;
use uuid::Uuid;

use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct UserEntity {
    id: uuid::Uuid,
    username: String,
    is_instructor: bool,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserEntityCreate {
    pub username: String,
    pub is_instructor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Instructor,
    Student,
}

impl From<bool> for UserRole {
    fn from(is_instructor: bool) -> Self {
        if is_instructor {
            Self::Instructor
        } else {
            Self::Student
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instructor => write!(f, "instructor"),
            Self::Student => write!(f, "student"),
        }
    }
}

impl ResourceTyped for UserEntity {
    fn get_resource_type() -> crate::model::repo::ResourceType {
        crate::model::repo::ResourceType::User
    }
}

impl UserEntity {
    pub fn new(id: Uuid, username: String, is_instructor: bool) -> Self {
        Self {
            id,
            username,
            is_instructor,
        }
    }

    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_instructor(&self) -> bool {
        self.is_instructor
    }

    pub fn role(&self) -> UserRole {
        UserRole::from(self.is_instructor)
    }
}

#[async_trait::async_trait]
impl CrudRepository<UserEntity, UserEntityCreate, uuid::Uuid> for UserEntity {
    async fn create(mm: &ModelManager, data: UserEntityCreate) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, is_instructor) VALUES ($1,$2,$3) RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(data.is_instructor)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        Ok(UserEntity {
            id,
            username: data.username,
            is_instructor: data.is_instructor,
        })
    }

    async fn find_by_id(mm: &ModelManager, id: uuid::Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }

        Ok(Some(result?))
    }

    async fn list(mm: &ModelManager) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM users")
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }
}

impl UserEntity {
    pub async fn find_by_username(
        mm: &ModelManager,
        username: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    /// Looks the user up by name, but only if the account holds `role`.
    pub async fn find_by_username_and_role(
        mm: &ModelManager,
        username: &str,
        role: UserRole,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE username = $1 AND is_instructor = $2")
            .bind(username)
            .bind(role == UserRole::Instructor)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}
