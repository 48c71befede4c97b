//! Routing-level access decisions, exercised in-process against an
//! in-memory access store. Every request here is settled before a handler
//! touches the database.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{app, get, jwt, send, with_json};
use faculty_api::auth::Role;
use faculty_api::testing::{token_for, MemoryAccessStore};

const STUDENT: i64 = 5;
const PEER_LECTURER: i64 = 8;
const LECTURER: i64 = 9;
const LEADER: i64 = 20;
const MANAGER: i64 = 30;
const STUDENT_REPORT: i64 = 1;
const COURSE: i64 = 42;

fn faculty() -> MemoryAccessStore {
    MemoryAccessStore::new()
        .with_user(STUDENT, Role::Student)
        .with_user(PEER_LECTURER, Role::Lecturer)
        .with_user(LECTURER, Role::Lecturer)
        .with_user(LEADER, Role::ProgramLeader)
        .with_user(MANAGER, Role::FacultyManager)
        .with_inactive_user(6, Role::Student)
        .with_report(STUDENT_REPORT, STUDENT, COURSE)
}

fn token(user_id: i64, role: Role) -> String {
    token_for(user_id, role, &jwt())
}

#[tokio::test]
async fn me_returns_the_stored_identity() -> Result<()> {
    let (res, body) = send(app(faculty()), get("/api/auth/me", Some(&token(LECTURER, Role::Lecturer)))).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], LECTURER);
    assert_eq!(body["data"]["role"], "lecturer");
    Ok(())
}

#[tokio::test]
async fn me_rejects_missing_and_inactive_sessions() -> Result<()> {
    let (res, body) = send(app(faculty()), get("/api/auth/me", None)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (res, _) = send(app(faculty()), get("/api/auth/me", Some(&token(6, Role::Student)))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let other_secret = faculty_api::auth::JwtSettings::new("some-other-secret", 1);
    let forged = token_for(MANAGER, Role::FacultyManager, &other_secret);
    let (res, _) = send(app(faculty()), get("/api/auth/me", Some(&forged))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn session_probe_reports_the_user() -> Result<()> {
    let (res, body) = send(app(faculty()), get("/api/session", Some(&token(STUDENT, Role::Student)))).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body["data"]["authenticated"], true);
    assert_eq!(body["data"]["user"]["id"], STUDENT);

    let (res, body) = send(app(faculty()), get("/api/session", None)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body["data"]["authenticated"], false);
    assert!(body["data"].get("user").is_none());
    Ok(())
}

#[tokio::test]
async fn lecturer_outside_the_course_cannot_read_student_report() -> Result<()> {
    let lecturer = token(LECTURER, Role::Lecturer);

    let (res, body) = send(app(faculty()), get("/api/reports/1", Some(&lecturer))).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (res, _) = send(
        app(faculty()),
        with_json("PATCH", "/api/reports/1/status", Some(&lecturer), json!({"status": "approved"})),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn missing_report_is_not_found_for_everyone() -> Result<()> {
    for (id, role) in [(STUDENT, Role::Student), (MANAGER, Role::FacultyManager)] {
        let (res, body) = send(app(faculty()), get("/api/reports/999", Some(&token(id, role)))).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", role);
        assert_eq!(body["code"], "NOT_FOUND");
    }
    Ok(())
}

#[tokio::test]
async fn user_directory_is_leadership_only() -> Result<()> {
    for (id, role) in [(STUDENT, Role::Student), (LECTURER, Role::Lecturer)] {
        let (res, _) = send(app(faculty()), get("/api/users", Some(&token(id, role)))).await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{}", role);
    }
    Ok(())
}

#[tokio::test]
async fn profiles_follow_owner_or_higher() -> Result<()> {
    // Lecturer on program leader: lower rank
    let (res, _) = send(app(faculty()), get("/api/users/20", Some(&token(LECTURER, Role::Lecturer)))).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Equal rank is not enough
    let (res, _) = send(app(faculty()), get("/api/users/8", Some(&token(LECTURER, Role::Lecturer)))).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let (res, _) = send(app(faculty()), get("/api/users/777", Some(&token(MANAGER, Role::FacultyManager)))).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn only_faculty_managers_toggle_accounts() -> Result<()> {
    let (res, _) = send(
        app(faculty()),
        with_json("PATCH", "/api/users/9/active", Some(&token(LEADER, Role::ProgramLeader)), json!({"active": false})),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn rating_summaries_are_private_to_the_lecturer_and_above() -> Result<()> {
    let (res, _) = send(
        app(faculty()),
        get("/api/ratings/lecturers/9", Some(&token(PEER_LECTURER, Role::Lecturer))),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let (res, _) = send(app(faculty()), get("/api/ratings/lecturers/9", Some(&token(STUDENT, Role::Student)))).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn only_students_submit_ratings() -> Result<()> {
    let rating = json!({
        "course_id": COURSE,
        "lecturer_id": LECTURER,
        "academic_year": "2025/2026",
        "semester": 1,
        "score": 4
    });
    let (res, _) = send(
        app(faculty()),
        with_json("POST", "/api/ratings", Some(&token(LECTURER, Role::Lecturer)), rating),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn out_of_range_rating_is_rejected_with_field_errors() -> Result<()> {
    let rating = json!({
        "course_id": COURSE,
        "lecturer_id": LECTURER,
        "academic_year": "2025/2026",
        "semester": 1,
        "score": 9
    });
    let (res, body) = send(
        app(faculty()),
        with_json("POST", "/api/ratings", Some(&token(STUDENT, Role::Student)), rating),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["score"].is_string(), "{}", body);
    Ok(())
}

#[tokio::test]
async fn catalogue_changes_need_the_right_role() -> Result<()> {
    let course = json!({"stream_id": 1, "name": "Databases", "code": "DB101"});
    let (res, _) = send(
        app(faculty()),
        with_json("POST", "/api/courses", Some(&token(LECTURER, Role::Lecturer)), course),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let stream = json!({"name": "Computing", "code": "CS"});
    let (res, _) = send(
        app(faculty()),
        with_json("POST", "/api/streams", Some(&token(LEADER, Role::ProgramLeader)), stream),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // A student cannot lead a stream
    let stream = json!({"name": "Computing", "code": "CS", "leader_id": STUDENT});
    let (res, _) = send(
        app(faculty()),
        with_json("POST", "/api/streams", Some(&token(MANAGER, Role::FacultyManager)), stream),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn self_registration_rejects_privileged_roles() -> Result<()> {
    let body = json!({
        "name": "Mallory",
        "email": "mallory@example.edu",
        "password": "long-enough-password",
        "role": "faculty_manager"
    });
    let (res, body) = send(app(faculty()), with_json("POST", "/api/auth/register", None, body)).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN, "{}", body);
    Ok(())
}
