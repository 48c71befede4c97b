use sqlx::PgPool;

use crate::database::manager::{conflict_on_unique, DatabaseError};
use crate::database::models::{Course, Stream};

pub async fn list_streams(pool: &PgPool) -> Result<Vec<Stream>, DatabaseError> {
    let streams = sqlx::query_as::<_, Stream>(
        "SELECT id, name, code, leader_id, created_at FROM streams ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(streams)
}

pub async fn create_stream(
    pool: &PgPool,
    name: &str,
    code: &str,
    leader_id: Option<i64>,
) -> Result<Stream, DatabaseError> {
    sqlx::query_as::<_, Stream>(
        "INSERT INTO streams (name, code, leader_id) VALUES ($1, $2, $3) \
         RETURNING id, name, code, leader_id, created_at",
    )
    .bind(name)
    .bind(code)
    .bind(leader_id)
    .fetch_one(pool)
    .await
    .map_err(|e| conflict_on_unique(e, format!("Stream code '{}' already exists", code)))
}

pub async fn stream_exists(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM streams WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists.0)
}

/// Course catalogue, optionally narrowed to a stream and/or a lecturer's assignments
pub async fn list_courses(
    pool: &PgPool,
    stream_id: Option<i64>,
    taught_by: Option<i64>,
) -> Result<Vec<Course>, DatabaseError> {
    let courses = sqlx::query_as::<_, Course>(
        "SELECT c.id, c.stream_id, c.name, c.code, c.created_at FROM courses c \
         WHERE ($1::bigint IS NULL OR c.stream_id = $1) \
           AND ($2::bigint IS NULL OR EXISTS ( \
                SELECT 1 FROM lecturer_courses lc \
                WHERE lc.course_id = c.id AND lc.lecturer_id = $2)) \
         ORDER BY c.code",
    )
    .bind(stream_id)
    .bind(taught_by)
    .fetch_all(pool)
    .await?;
    Ok(courses)
}

pub async fn find_course(pool: &PgPool, id: i64) -> Result<Option<Course>, DatabaseError> {
    let course = sqlx::query_as::<_, Course>(
        "SELECT id, stream_id, name, code, created_at FROM courses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(course)
}

pub async fn create_course(
    pool: &PgPool,
    stream_id: i64,
    name: &str,
    code: &str,
) -> Result<Course, DatabaseError> {
    sqlx::query_as::<_, Course>(
        "INSERT INTO courses (stream_id, name, code) VALUES ($1, $2, $3) \
         RETURNING id, stream_id, name, code, created_at",
    )
    .bind(stream_id)
    .bind(name)
    .bind(code)
    .fetch_one(pool)
    .await
    .map_err(|e| conflict_on_unique(e, format!("Course code '{}' already exists", code)))
}

/// Returns false when the assignment already existed
pub async fn assign_lecturer(pool: &PgPool, course_id: i64, lecturer_id: i64) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO lecturer_courses (lecturer_id, course_id) VALUES ($1, $2) \
         ON CONFLICT DO NOTHING",
    )
    .bind(lecturer_id)
    .bind(course_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn unassign_lecturer(pool: &PgPool, course_id: i64, lecturer_id: i64) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM lecturer_courses WHERE lecturer_id = $1 AND course_id = $2")
        .bind(lecturer_id)
        .bind(course_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn teaches(pool: &PgPool, lecturer_id: i64, course_id: i64) -> Result<bool, DatabaseError> {
    let exists: (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM lecturer_courses WHERE lecturer_id = $1 AND course_id = $2)",
    )
    .bind(lecturer_id)
    .bind(course_id)
    .fetch_one(pool)
    .await?;
    Ok(exists.0)
}
