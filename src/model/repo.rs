use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    User,
    Course,
    Quiz,
    Progress,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Course => write!(f, "course"),
            Self::Quiz => write!(f, "quiz"),
            Self::Progress => write!(f, "progress"),
        }
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

#[async_trait::async_trait]
pub trait CrudRepository<T, Create, V>
where
    T: ResourceTyped,
    V: Clone + Copy,
{
    async fn create(mm: &ModelManager, data: Create) -> DatabaseResult<T>;

    async fn find_by_id(mm: &ModelManager, id: V) -> DatabaseResult<Option<T>>;

    /// Unfiltered scan of the whole collection.
    async fn list(mm: &ModelManager) -> DatabaseResult<Vec<T>>;
}
