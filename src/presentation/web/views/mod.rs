mod authors;
mod books;

pub use authors::{AuthorOptionView, AuthorView};
pub use books::{BookDetailView, BookFormView, BookView, SearchView};

use crate::domain::ids::BookId;

pub(crate) const EM_DASH: &str = "\u{2014}";

pub fn book_path(id: BookId) -> String {
    format!("/books/{id}")
}

pub fn cover_path(file_name: &str) -> String {
    format!("/covers/{file_name}")
}

pub(crate) fn or_em_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| EM_DASH.to_string())
}
