use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UserCreateBody {
    pub username: String,
    #[serde(default)]
    pub is_instructor: bool,
}
