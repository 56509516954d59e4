use crate::domain::books::{Book, BookWithAuthor};

use super::{book_path, cover_path, or_em_dash};

/// Card view for book listings (home page and search results).
pub struct BookView {
    pub id: String,
    pub detail_path: String,
    pub title: String,
    pub publish_date: String,
    pub page_count: String,
    /// Empty when the book has no stored cover.
    pub cover_url: String,
    pub created_date: String,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        let detail_path = book_path(book.id);
        let cover_url = book
            .cover_image_name
            .as_deref()
            .map(cover_path)
            .unwrap_or_default();

        Self {
            id: book.id.to_string(),
            detail_path,
            title: book.title,
            publish_date: book.publish_date.format("%Y-%m-%d").to_string(),
            page_count: book.page_count.to_string(),
            cover_url,
            created_date: book.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

pub struct BookDetailView {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub publish_date: String,
    pub page_count: String,
    pub description: String,
    pub cover_url: String,
    pub edit_path: String,
    pub delete_path: String,
}

impl BookDetailView {
    pub fn from_domain(enriched: BookWithAuthor) -> Self {
        let book = enriched.book;
        let author_name = or_em_dash(enriched.author.map(|a| a.name));
        let cover_url = book
            .cover_image_name
            .as_deref()
            .map(cover_path)
            .unwrap_or_default();

        Self {
            edit_path: format!("/books/{}/edit", book.id),
            delete_path: format!("/books/{}/delete", book.id),
            id: book.id.to_string(),
            title: book.title,
            author_name,
            publish_date: book.publish_date.format("%Y-%m-%d").to_string(),
            page_count: book.page_count.to_string(),
            description: book.description.unwrap_or_default(),
            cover_url,
        }
    }
}

/// Raw field values for the creation/edit form. Carries whatever the user
/// submitted so a failed save re-renders their input verbatim.
#[derive(Default)]
pub struct BookFormView {
    pub title: String,
    pub author_id: String,
    pub publish_date: String,
    pub page_count: String,
    pub description: String,
}

impl BookFormView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_domain(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author_id: book
                .author_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            publish_date: book.publish_date.format("%Y-%m-%d").to_string(),
            page_count: book.page_count.to_string(),
            description: book.description.clone().unwrap_or_default(),
        }
    }
}

/// Raw search parameter values echoed back into the search form.
#[derive(Default)]
pub struct SearchView {
    pub title: String,
    pub published_before: String,
    pub published_after: String,
}
