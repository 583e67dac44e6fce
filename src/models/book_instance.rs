//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

/// Loan status of a copy, stored as a single-character code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LoanStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {}", s)),
        }
    }
}

// SQLx conversion for LoanStatus (stored as a text code)
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_code().to_string(), buf)
    }
}

/// A physical, loanable copy of a book.
///
/// `due_back` is meaningful only while `status` is on-loan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
}

impl BookInstance {
    /// Whether the copy is on loan and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == LoanStatus::OnLoan
            && self.due_back.map(|d| d < today).unwrap_or(false)
    }
}

/// Copy with resolved book title and borrower name for loan listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstanceDetails {
    pub id: Uuid,
    pub book_id: i32,
    pub title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    pub borrower_name: Option<String>,
}

/// Create copy request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: i32,
    pub imprint: String,
    pub status: Option<LoanStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(status: LoanStatus, due_back: Option<NaiveDate>) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book_id: 1,
            imprint: "Unlikely Imprint, 2016".to_string(),
            due_back,
            status,
            borrower_id: None,
        }
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [
            LoanStatus::Maintenance,
            LoanStatus::OnLoan,
            LoanStatus::Available,
            LoanStatus::Reserved,
        ] {
            assert_eq!(status.as_code().parse::<LoanStatus>().unwrap(), status);
        }
        assert!("x".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn overdue_only_applies_to_copies_on_loan() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();

        assert!(copy(LoanStatus::OnLoan, Some(past)).is_overdue(today));
        assert!(!copy(LoanStatus::OnLoan, Some(today)).is_overdue(today));
        assert!(!copy(LoanStatus::OnLoan, None).is_overdue(today));
        assert!(!copy(LoanStatus::Available, Some(past)).is_overdue(today));
    }
}
