use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::repositories::{AuthorRepository, BookRepository, CoverStore};
use crate::infrastructure::covers::FsCoverStore;
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::authors::SqlAuthorRepository;
use crate::infrastructure::repositories::books::SqlBookRepository;

/// Everything that varies between production and test environments. The
/// upload directory is passed in explicitly rather than read from a
/// shared namespace; the cover store is built from it.
pub struct AppStateConfig {
    pub upload_dir: PathBuf,
}

#[derive(Clone)]
pub struct AppState {
    pub book_repo: Arc<dyn BookRepository>,
    pub author_repo: Arc<dyn AuthorRepository>,
    pub cover_store: Arc<dyn CoverStore>,
}

impl AppState {
    /// Build the full application state from a database connection and
    /// config. Creates all repositories internally.
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let pool = database.clone_pool();

        let book_repo: Arc<dyn BookRepository> = Arc::new(SqlBookRepository::new(pool.clone()));
        let author_repo: Arc<dyn AuthorRepository> = Arc::new(SqlAuthorRepository::new(pool));
        let cover_store: Arc<dyn CoverStore> = Arc::new(FsCoverStore::new(config.upload_dir));

        Self {
            book_repo,
            author_repo,
            cover_store,
        }
    }
}
