//! Book instances (copies) repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceDetails, CreateBookInstance, LoanStatus},
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))
    }

    /// List copies on loan to a given borrower, ordered by due date
    pub async fn list_borrowed_by_user(
        &self,
        borrower_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BookInstanceDetails>, i64)> {
        let offset = (page - 1) * per_page;

        let copies = sqlx::query_as::<_, BookInstanceDetails>(
            r#"
            SELECT bi.id, bi.book_id, b.title, bi.imprint, bi.due_back, bi.status,
                   bi.borrower_id, NULL::text AS borrower_name
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            WHERE bi.borrower_id = $1 AND bi.status = 'o'
            ORDER BY bi.due_back
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(borrower_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE borrower_id = $1 AND status = 'o'",
        )
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((copies, total))
    }

    /// List every copy currently on loan, ordered by due date
    pub async fn list_all_borrowed(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BookInstanceDetails>, i64)> {
        let offset = (page - 1) * per_page;

        let copies = sqlx::query_as::<_, BookInstanceDetails>(
            r#"
            SELECT bi.id, bi.book_id, b.title, bi.imprint, bi.due_back, bi.status,
                   bi.borrower_id,
                   u.last_name || ', ' || u.first_name AS borrower_name
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.status = 'o'
            ORDER BY bi.due_back
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = 'o'")
                .fetch_one(&self.pool)
                .await?;

        Ok((copies, total))
    }

    /// List copies of a single book
    pub async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let copies = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(copies)
    }

    /// Create a new copy
    pub async fn create(&self, copy: &CreateBookInstance) -> AppResult<BookInstance> {
        let created = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(copy.book_id)
        .bind(&copy.imprint)
        .bind(copy.status.unwrap_or(LoanStatus::Maintenance))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Set the due-back date of a copy. The single mutation a renewal makes;
    /// status and borrower are left untouched.
    pub async fn update_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        let result = sqlx::query("UPDATE book_instances SET due_back = $1 WHERE id = $2")
            .bind(due_back)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }

        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count available copies
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = 'a'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
