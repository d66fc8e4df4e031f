mod common;
use axum::http::StatusCode;
use edu_platform::model::entity::Course;
use serde_json::json;
use uuid::Uuid;

use crate::common::{
    Action, Flow, add_quiz_action, create_course_action, create_user_action, setup_server,
    setup_test_db,
};

#[tokio::test]
async fn route_course_create_test() {
    let db = setup_test_db().await;
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(create_user_action("prof", true).with_save_as("prof"))
        .step(create_user_action("pupil", false))
        .step(
            create_course_action("Rust", "prof")
                .with_save_as("course")
                .assert_with_ctx(|ctx, body| {
                    let course: Course =
                        serde_json::from_value(body.clone()).expect("Invalid body format");
                    assert_eq!(course.title(), "Rust");
                    assert_eq!(course.description(), Some("Rust for beginners"));
                    assert_eq!(course.instructor_id().to_string(), ctx.id_of("prof"));
                    assert!(course.quizzes().is_empty());
                }),
        )
        // students can't author courses
        .step(
            create_course_action("Cheating 101", "pupil")
                .with_expect(StatusCode::FORBIDDEN)
                .assert_body(|body| {
                    assert_eq!(body["message"], "Only instructors can create courses.");
                }),
        )
        // neither can accounts that don't exist
        .step(create_course_action("Ghost", "nobody").with_expect(StatusCode::FORBIDDEN))
        // description is optional
        .step(
            Action::new("create_course_no_desc", "POST", "/courses/")
                .with_body(json!({ "title": "Bare", "instructor_username": "prof" }))
                .assert_body(|body| assert!(body["description"].is_null())),
        )
        .step(
            Action::new("list_courses", "GET", "/courses/").assert_body(|body| {
                let courses = body.as_array().expect("expected an array");
                assert_eq!(courses.len(), 2);
            }),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_quiz_add_test() {
    let db = setup_test_db().await;
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(create_user_action("prof", true))
        .step(create_course_action("Rust", "prof").with_save_as("course"))
        .step(add_quiz_action("course", "Is Rust memory safe?").assert_body(|body| {
            assert_eq!(body["quizzes"].as_array().unwrap().len(), 1);
        }))
        .step(add_quiz_action("course", "Does Rust have a GC?").assert_body(|body| {
            let quizzes = body["quizzes"].as_array().unwrap();
            assert_eq!(quizzes.len(), 2);
            // appended in order
            assert_eq!(quizzes[0]["question"], "Is Rust memory safe?");
            assert_eq!(quizzes[1]["question"], "Does Rust have a GC?");
            assert_eq!(quizzes[1]["options"], json!(["yes", "no"]));
        }))
        .step(
            Action::new("get_course", "GET", "dynamic")
                .with_dyn_path(|ctx| format!("/courses/{}/", ctx.id_of("course")))
                .assert_body(|body| assert_eq!(body["quizzes"].as_array().unwrap().len(), 2)),
        )
        // correct option points past the options
        .step(
            Action::new("add_bad_quiz", "POST", "dynamic")
                .with_dyn_path(|ctx| format!("/courses/{}/quizzes/", ctx.id_of("course")))
                .with_body(json!({
                    "question": "?",
                    "options": ["a"],
                    "correct_option_index": 3,
                }))
                .with_expect(StatusCode::BAD_REQUEST),
        )
        .step(
            Action::new("add_quiz_unknown_course", "POST", "dynamic")
                .with_dyn_path(|_| format!("/courses/{}/quizzes/", Uuid::new_v4()))
                .with_body(json!({
                    "question": "?",
                    "options": ["a"],
                    "correct_option_index": 0,
                }))
                .with_expect(StatusCode::NOT_FOUND),
        )
        .step(
            Action::new("get_unknown_course", "GET", "dynamic")
                .with_dyn_path(|_| format!("/courses/{}/", Uuid::new_v4()))
                .with_expect(StatusCode::NOT_FOUND),
        )
        .step(
            Action::new("get_malformed_course_id", "GET", "/courses/not-a-uuid/")
                .with_expect(StatusCode::BAD_REQUEST),
        )
        .run(&mut server, db)
        .await;
}
