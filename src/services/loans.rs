//! Loan tracking and renewal service

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceDetails},
    repository::Repository,
    services::renewal,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Copies on loan to the given borrower, ordered by due date
    pub async fn my_borrowed(
        &self,
        borrower_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BookInstanceDetails>, i64)> {
        self.repository
            .book_instances
            .list_borrowed_by_user(borrower_id, page, per_page)
            .await
    }

    /// Every copy currently on loan, ordered by due date
    pub async fn all_borrowed(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BookInstanceDetails>, i64)> {
        self.repository
            .book_instances
            .list_all_borrowed(page, per_page)
            .await
    }

    /// Fetch a copy along with the default renewal proposal for it
    pub async fn renewal_proposal(
        &self,
        copy_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<(BookInstance, NaiveDate)> {
        let copy = self.repository.book_instances.get_by_id(copy_id).await?;
        Ok((copy, renewal::default_renewal_date(today)))
    }

    /// Renew a copy: validate the submitted date against today's renewal
    /// window, then persist the new due-back date. The copy is untouched on
    /// rejection; status and borrower are never mutated.
    pub async fn renew_copy(
        &self,
        copy_id: Uuid,
        submitted: Option<NaiveDate>,
        today: NaiveDate,
    ) -> AppResult<NaiveDate> {
        let copy = self.repository.book_instances.get_by_id(copy_id).await?;

        let due_back = renewal::check_submission(submitted, today).map_err(|e| {
            AppError::FieldValidation {
                field: "due_back",
                message: e.to_string(),
            }
        })?;

        self.repository
            .book_instances
            .update_due_back(copy.id, due_back)
            .await?;

        tracing::info!("Renewed copy {} until {}", copy.id, due_back);
        Ok(due_back)
    }
}
