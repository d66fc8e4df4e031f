pub mod courses;
pub mod progress;
pub mod users;
