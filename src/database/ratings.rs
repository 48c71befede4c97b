use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{CourseRatingSummary, Rating};

pub struct NewRating<'a> {
    pub student_id: i64,
    pub course_id: i64,
    pub lecturer_id: i64,
    pub academic_year: &'a str,
    pub semester: i16,
    pub score: i16,
    pub comment: Option<&'a str>,
}

/// Whether the student already rated this course/lecturer pair in the period
pub async fn exists_for_period(pool: &PgPool, rating: &NewRating<'_>) -> Result<bool, DatabaseError> {
    let exists: (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM class_ratings \
         WHERE student_id = $1 AND course_id = $2 AND lecturer_id = $3 \
           AND academic_year = $4 AND semester = $5)",
    )
    .bind(rating.student_id)
    .bind(rating.course_id)
    .bind(rating.lecturer_id)
    .bind(rating.academic_year)
    .bind(rating.semester)
    .fetch_one(pool)
    .await?;
    Ok(exists.0)
}

pub async fn create(pool: &PgPool, rating: NewRating<'_>) -> Result<Rating, DatabaseError> {
    let created = sqlx::query_as::<_, Rating>(
        "INSERT INTO class_ratings \
           (student_id, course_id, lecturer_id, academic_year, semester, score, comment) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, student_id, course_id, lecturer_id, academic_year, semester, score, comment, created_at",
    )
    .bind(rating.student_id)
    .bind(rating.course_id)
    .bind(rating.lecturer_id)
    .bind(rating.academic_year)
    .bind(rating.semester)
    .bind(rating.score)
    .bind(rating.comment)
    .fetch_one(pool)
    .await?;
    Ok(created)
}

pub async fn lecturer_summary(
    pool: &PgPool,
    lecturer_id: i64,
    academic_year: Option<&str>,
    semester: Option<i16>,
) -> Result<Vec<CourseRatingSummary>, DatabaseError> {
    let rows = sqlx::query_as::<_, CourseRatingSummary>(
        "SELECT c.id AS course_id, c.name AS course_name, \
                COUNT(*) AS count, AVG(cr.score)::float8 AS average \
         FROM class_ratings cr JOIN courses c ON c.id = cr.course_id \
         WHERE cr.lecturer_id = $1 \
           AND ($2::text IS NULL OR cr.academic_year = $2) \
           AND ($3::smallint IS NULL OR cr.semester = $3) \
         GROUP BY c.id, c.name ORDER BY c.name",
    )
    .bind(lecturer_id)
    .bind(academic_year)
    .bind(semester)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_by_student(pool: &PgPool, student_id: i64) -> Result<i64, DatabaseError> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM class_ratings WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
