use sqlx::PgPool;

use crate::auth::Role;
use crate::database::manager::{conflict_on_unique, DatabaseError};
use crate::database::models::User;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, active, created_at";

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
}

/// Look up a user by login email (any activation state)
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {} FROM users WHERE lower(email) = lower($1)", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn list(pool: &PgPool, role: Option<Role>) -> Result<Vec<User>, DatabaseError> {
    let sql = format!(
        "SELECT {} FROM users WHERE ($1::text IS NULL OR role = $1) ORDER BY name",
        USER_COLUMNS
    );
    let users = sqlx::query_as::<_, User>(&sql)
        .bind(role.map(Role::as_str))
        .fetch_all(pool)
        .await?;
    Ok(users)
}

pub async fn create(pool: &PgPool, new_user: NewUser<'_>) -> Result<User, DatabaseError> {
    let sql = format!(
        "INSERT INTO users (name, email, password_hash, role, active) \
         VALUES ($1, $2, $3, $4, true) RETURNING {}",
        USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.role.as_str())
        .fetch_one(pool)
        .await
        .map_err(|e| conflict_on_unique(e, format!("Email '{}' is already registered", new_user.email)))
}

pub async fn set_active(pool: &PgPool, id: i64, active: bool) -> Result<Option<User>, DatabaseError> {
    let sql = format!("UPDATE users SET active = $2 WHERE id = $1 RETURNING {}", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .bind(active)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}
