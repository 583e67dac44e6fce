//! Catalog management service: authors, books, copies, counts

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{Book, BookDetails, BookQuery, BookShort, CreateBook, Genre, Language, UpdateBook},
        book_instance::{BookInstance, CreateBookInstance},
    },
    repository::Repository,
};

use serde::Serialize;
use utoipa::ToSchema;

/// Catalog-wide object counts for the landing page
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub books: i64,
    pub copies: i64,
    pub copies_available: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    page_size: i64,
}

impl CatalogService {
    pub fn new(repository: Repository, page_size: i64) -> Self {
        Self { repository, page_size }
    }

    /// List authors, paginated
    pub async fn list_authors(
        &self,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<Author>, i64)> {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page.unwrap_or(self.page_size).clamp(1, 100);
        self.repository.authors.list(page, per_page).await
    }

    /// Get author by ID
    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create a new author
    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    /// Update an existing author
    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    /// Delete an author
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    /// List books with optional title filter, paginated
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.list(query, self.page_size).await
    }

    /// Get book with resolved author, language and genre names
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        // Verify author exists
        self.repository.authors.get_by_id(book.author_id).await?;
        self.repository.books.create(&book).await
    }

    /// Update an existing book
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        self.repository.books.update(id, &book).await
    }

    /// Delete a book
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// List copies of a book
    pub async fn list_copies(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        // Verify book exists
        self.repository.books.get_by_id(book_id).await?;
        self.repository.book_instances.list_by_book(book_id).await
    }

    /// Create a copy of a book
    pub async fn create_copy(&self, copy: CreateBookInstance) -> AppResult<BookInstance> {
        self.repository.books.get_by_id(copy.book_id).await?;
        self.repository.book_instances.create(&copy).await
    }

    /// List all genres
    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.books.list_genres().await
    }

    /// List all languages
    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.books.list_languages().await
    }

    /// Catalog-wide counts
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        Ok(CatalogCounts {
            books: self.repository.books.count().await?,
            copies: self.repository.book_instances.count().await?,
            copies_available: self.repository.book_instances.count_available().await?,
            authors: self.repository.authors.count().await?,
            genres: self.repository.books.count_genres().await?,
        })
    }
}
