use clap::{Parser, Subcommand};
use edu_platform::model::entity::{
    Course, CourseCreate, QuizQuestion, UserEntity, UserEntityCreate, UserRole,
};
use edu_platform::model::{CrudRepository, DbConnection, ModelManager, has_role};

#[derive(Parser, Debug)]
#[command(about = "CLI tool for filling the educational platform DB", long_about = None)]
pub struct Cli {
    /// Database to operate on. Falls back to `DATABASE_URL`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Apply pending migrations before running the command
    #[arg(long, default_value_t = false)]
    pub migrate: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage quiz questions
    Quiz {
        #[command(subcommand)]
        action: QuizCommands,
    },
}

/// User management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long, default_value_t = false)]
        instructor: bool,
    },
    List,
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Username of the owning instructor
        #[arg(long)]
        instructor: String,
    },
    List,
}

/// Quiz management
#[derive(Subcommand, Debug)]
pub enum QuizCommands {
    Add {
        /// Course id to append the question to
        #[arg(long)]
        course_id: uuid::Uuid,
        #[arg(long)]
        question: String,
        /// Repeat for every option, in order
        #[arg(long = "option", required = true)]
        options: Vec<String>,
        #[arg(long)]
        correct: i32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let db_con = DbConnection::connect(&args.database_url)?;
    if args.migrate {
        db_con.migrate().await?;
    }
    let mm = ModelManager::new(db_con);

    match args.command {
        Commands::User { action } => match action {
            UserCommands::Add {
                username,
                instructor,
            } => {
                if UserEntity::find_by_username(&mm, &username).await?.is_some() {
                    return Err(format!("username `{}` already exists", username).into());
                }
                let user = UserEntity::create(
                    &mm,
                    UserEntityCreate {
                        username,
                        is_instructor: instructor,
                    },
                )
                .await?;
                println!("User created: {:?}", user);
            }
            UserCommands::List => {
                for user in UserEntity::list(&mm).await? {
                    println!("{}\t{}\t{}", user.id(), user.username(), user.role());
                }
            }
        },

        Commands::Course { action } => match action {
            CourseCommands::Add {
                title,
                description,
                instructor,
            } => {
                let owner = UserEntity::find_by_username(&mm, &instructor)
                    .await?
                    .ok_or_else(|| format!("user `{}` not found", instructor))?;
                if !has_role(&owner, UserRole::Instructor) {
                    return Err(format!("user `{}` is not an instructor", instructor).into());
                }

                let course = Course::create(
                    &mm,
                    CourseCreate {
                        title,
                        description,
                        instructor_id: owner.id(),
                    },
                )
                .await?;
                println!("Course created: {:?}", course);
            }
            CourseCommands::List => {
                for course in Course::list(&mm).await? {
                    println!(
                        "{}\t{}\t{} quizzes",
                        course.id(),
                        course.title(),
                        course.quizzes().len()
                    );
                }
            }
        },

        Commands::Quiz { action } => match action {
            QuizCommands::Add {
                course_id,
                question,
                options,
                correct,
            } => {
                let quiz = QuizQuestion {
                    question,
                    options,
                    correct_option_index: correct,
                };
                quiz.validate()?;

                let course = Course::append_quiz(&mm, course_id, quiz)
                    .await?
                    .ok_or_else(|| format!("course {} not found", course_id))?;
                println!("Quiz appended, course now has {} quizzes", course.quizzes().len());
            }
        },
    }

    Ok(())
}
