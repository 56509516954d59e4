use askama::Template;

use super::views::{AuthorOptionView, AuthorView, BookDetailView, BookFormView, BookView, SearchView};

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub nav_active: &'static str,
    pub version: &'static str,
    pub book_count: u64,
    pub recent_books: Vec<BookView>,
}

#[derive(Template)]
#[template(path = "pages/books.html")]
pub struct BookListTemplate {
    pub nav_active: &'static str,
    pub version: &'static str,
    pub books: Vec<BookView>,
    pub search: SearchView,
}

#[derive(Template)]
#[template(path = "pages/book.html")]
pub struct BookDetailTemplate {
    pub nav_active: &'static str,
    pub version: &'static str,
    pub book: BookDetailView,
}

#[derive(Template)]
#[template(path = "pages/new_book.html")]
pub struct BookNewTemplate {
    pub nav_active: &'static str,
    pub version: &'static str,
    pub form: BookFormView,
    pub author_options: Vec<AuthorOptionView>,
    /// Empty when the form is rendered without a prior failure.
    pub error_message: String,
}

#[derive(Template)]
#[template(path = "pages/edit_book.html")]
pub struct BookEditTemplate {
    pub nav_active: &'static str,
    pub version: &'static str,
    pub id: String,
    pub form: BookFormView,
    pub author_options: Vec<AuthorOptionView>,
    pub error_message: String,
}

#[derive(Template)]
#[template(path = "pages/authors.html")]
pub struct AuthorListTemplate {
    pub nav_active: &'static str,
    pub version: &'static str,
    pub authors: Vec<AuthorView>,
    pub search_name: String,
    /// Submitted name preserved on a failed create.
    pub form_name: String,
    pub error_message: String,
}

pub fn render_template<T: Template>(template: T) -> Result<String, askama::Error> {
    template.render()
}
