use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::application::routes::render_html;
use crate::application::state::AppState;
use crate::presentation::web::templates::HomeTemplate;
use crate::presentation::web::views::BookView;

const RECENT_BOOKS_LIMIT: u32 = 10;

#[tracing::instrument(skip(state))]
pub(crate) async fn home_page(State(state): State<AppState>) -> Result<Response, StatusCode> {
    // The home page degrades to an empty shelf rather than erroring.
    let recent_books = state
        .book_repo
        .list_recent(RECENT_BOOKS_LIMIT)
        .await
        .unwrap_or_else(|err| {
            warn!(error = %err, "failed to load recently added books");
            Vec::new()
        });

    let book_count = state.book_repo.count().await.unwrap_or_else(|err| {
        warn!(error = %err, "failed to count books");
        0
    });

    let template = HomeTemplate {
        nav_active: "home",
        version: crate::VERSION,
        book_count,
        recent_books: recent_books.into_iter().map(BookView::from).collect(),
    };

    render_html(template).map(IntoResponse::into_response)
}
