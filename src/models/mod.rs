//! Data models for LocalLib

pub mod author;
pub mod book;
pub mod book_instance;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetails, Genre, Language};
pub use book_instance::{BookInstance, LoanStatus};
pub use user::{User, UserClaims};
