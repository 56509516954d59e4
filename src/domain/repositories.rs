use async_trait::async_trait;

use crate::domain::authors::{Author, NewAuthor};
use crate::domain::books::{Book, BookFilter, BookWithAuthor, NewBook, UpdateBook, UpdatedBook};
use crate::domain::covers::CoverUpload;
use crate::domain::errors::{CoverStoreError, RepositoryError};
use crate::domain::ids::{AuthorId, BookId};

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError>;
    async fn get(&self, id: BookId) -> Result<Book, RepositoryError>;
    /// Lookup with the author reference resolved, for the detail view.
    async fn get_with_author(&self, id: BookId) -> Result<BookWithAuthor, RepositoryError>;
    /// All books matching the composed filter, newest first.
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, RepositoryError>;
    /// Most recently added books, for the home page.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Book>, RepositoryError>;
    /// Overwrite per `UpdateBook` semantics, reporting any displaced cover
    /// file name so the caller can remove the file.
    async fn update(&self, id: BookId, changes: UpdateBook) -> Result<UpdatedBook, RepositoryError>;
    /// Atomic find-and-remove, returning the removed record.
    async fn delete(&self, id: BookId) -> Result<Book, RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn insert(&self, author: NewAuthor) -> Result<Author, RepositoryError>;
    async fn get(&self, id: AuthorId) -> Result<Author, RepositoryError>;
    /// Authors in name order, optionally restricted to a case-insensitive
    /// substring of the name.
    async fn list(&self, name: Option<&str>) -> Result<Vec<Author>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Author>, RepositoryError> {
        self.list(None).await
    }
}

#[async_trait]
pub trait CoverStore: Send + Sync {
    /// Accept the upload if its declared MIME type is allowed, writing it
    /// under a generated name. Rejection is silent: `Ok(None)`, no file,
    /// no error.
    async fn store(&self, upload: CoverUpload) -> Result<Option<String>, CoverStoreError>;
    /// Read a stored cover back for rendering.
    async fn read(&self, file_name: &str) -> Result<Vec<u8>, CoverStoreError>;
    /// Best-effort removal; failures are logged, never propagated.
    async fn delete(&self, file_name: &str);
}
