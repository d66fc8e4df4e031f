mod user;
pub use user::{UserEntity, UserEntityCreate, UserRole};

mod course;
pub use course::{Course, CourseCreate, QuizError, QuizQuestion};

mod progress;
pub use progress::{Progress, ProgressCreate};
