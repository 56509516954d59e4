mod authors;
mod books;
mod covers;
mod home;

use askama::Template;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::response::Html;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span, error};

use crate::application::state::AppState;
use crate::presentation::web::templates::render_template;

/// 5 MB request body limit (covers the largest accepted cover upload).
const BODY_LIMIT_BYTES: usize = 5 * 1024 * 1024;

/// Generate a static asset handler that serves an embedded file with cache headers.
macro_rules! static_asset_str {
    ($name:ident, $path:literal, $content_type:literal) => {
        async fn $name() -> impl axum::response::IntoResponse {
            (
                [
                    ("content-type", $content_type),
                    ("cache-control", "public, max-age=604800"),
                ],
                include_str!($path),
            )
        }
    };
}

pub fn app_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(home::home_page))
        .route(
            "/books",
            get(books::book_list_page).post(books::create_book),
        )
        .route("/books/new", get(books::new_book_page))
        .route(
            "/books/{id}",
            get(books::book_detail_page)
                .put(books::update_book)
                // POST alias: plain HTML forms cannot submit PUT
                .post(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/{id}/edit", get(books::book_edit_page))
        // POST alias: plain HTML forms cannot submit DELETE
        .route("/books/{id}/delete", post(books::delete_book))
        .route(
            "/authors",
            get(authors::author_list_page).post(authors::create_author),
        )
        .route("/covers/{file_name}", get(covers::cover_image))
        .route("/static/css/styles.css", get(styles))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(LibrariumMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(CompressionLayer::new().gzip(true)),
        )
        .with_state(state)
}

#[derive(Clone)]
struct LibrariumMakeSpan;

impl<B> MakeSpan<B> for LibrariumMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

static_asset_str!(
    styles,
    "../../../static/css/styles.css",
    "text/css; charset=utf-8"
);

async fn health() -> impl axum::response::IntoResponse {
    ([("content-type", "application/json")], r#"{"status":"ok"}"#)
}

pub(crate) fn render_html<T: Template>(template: T) -> Result<Html<String>, StatusCode> {
    render_template(template).map(Html).map_err(|err| {
        error!(error = %err, "failed to render template");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
