pub mod authors;
pub mod books;
pub mod covers;
pub mod errors;
pub mod ids;
pub mod repositories;

pub use errors::{CoverStoreError, RepositoryError};
