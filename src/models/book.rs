//! Book model and related reference data (genres, languages)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book genre (reference data)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Book language (reference data)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Book title record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub language_id: Option<i32>,
}

/// Book with resolved author and genre names for detail views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub author_name: String,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub language: Option<String>,
    pub genres: Vec<String>,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub author_name: String,
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author_id: i32,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub language_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author_id: Option<i32>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub language_id: Option<i32>,
    pub genre_ids: Option<Vec<i32>>,
}

/// Book query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BookQuery {
    /// Case-insensitive substring match on title
    pub title: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
