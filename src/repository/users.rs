//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by login, if any
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Create a new user with an already-hashed password
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        can_mark_returned: bool,
        can_view_all_borrowed: bool,
    ) -> AppResult<User> {
        let existing: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE login = $1)")
                .bind(login)
                .fetch_one(&self.pool)
                .await?;

        if existing {
            return Err(AppError::Conflict("Login already exists".to_string()));
        }

        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, password, first_name, last_name,
                               can_mark_returned, can_view_all_borrowed)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(login)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(can_mark_returned)
        .bind(can_view_all_borrowed)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
