use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::application::routes::render_html;
use crate::application::state::AppState;
use crate::domain::RepositoryError;
use crate::domain::books::{BookFilter, NewBook, UpdateBook};
use crate::domain::covers::CoverUpload;
use crate::domain::ids::{AuthorId, BookId};
use crate::presentation::web::templates::{
    BookDetailTemplate, BookEditTemplate, BookListTemplate, BookNewTemplate,
};
use crate::presentation::web::views::{
    AuthorOptionView, BookDetailView, BookFormView, BookView, SearchView, book_path,
};

const CREATE_ERROR: &str = "Error creating book";
const UPDATE_ERROR: &str = "Error updating book";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BookSearchQuery {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "publishedBefore")]
    published_before: Option<String>,
    #[serde(default, rename = "publishedAfter")]
    published_after: Option<String>,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn book_list_page(
    State(state): State<AppState>,
    Query(query): Query<BookSearchQuery>,
) -> Result<Response, StatusCode> {
    let search = SearchView {
        title: query.title.clone().unwrap_or_default(),
        published_before: query.published_before.clone().unwrap_or_default(),
        published_after: query.published_after.clone().unwrap_or_default(),
    };

    let Some(filter) = build_filter(&query) else {
        warn!("unparseable date in book search query");
        return Ok(Redirect::to("/").into_response());
    };

    match state.book_repo.list(&filter).await {
        Ok(books) => {
            let template = BookListTemplate {
                nav_active: "books",
                version: crate::VERSION,
                books: books.into_iter().map(BookView::from).collect(),
                search,
            };
            render_html(template).map(IntoResponse::into_response)
        }
        Err(err) => {
            warn!(error = %err, "book search failed");
            Ok(Redirect::to("/").into_response())
        }
    }
}

#[tracing::instrument(skip(state))]
pub(crate) async fn new_book_page(State(state): State<AppState>) -> Result<Response, StatusCode> {
    render_new_form(&state, BookFormView::empty(), false).await
}

#[tracing::instrument(skip(state, multipart))]
pub(crate) async fn create_book(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, StatusCode> {
    let mut submission = read_submission(multipart).await?;
    let form = submission.form_view();
    let cover = submission.cover.take();

    let stored_cover = match cover {
        Some(upload) => match state.cover_store.store(upload).await {
            Ok(name) => name,
            Err(err) => {
                warn!(error = %err, "failed to store cover upload");
                return render_new_form(&state, form, true).await;
            }
        },
        None => None,
    };

    let Some(parsed) = parse_submission(&submission) else {
        if let Some(name) = &stored_cover {
            state.cover_store.delete(name).await;
        }
        return render_new_form(&state, form, true).await;
    };

    let new_book = NewBook {
        title: parsed.title,
        author_id: parsed.author_id,
        publish_date: parsed.publish_date,
        page_count: parsed.page_count,
        cover_image_name: stored_cover.clone(),
        description: parsed.description,
        created_at: None,
    };

    match state.book_repo.insert(new_book).await {
        Ok(book) => Ok(Redirect::to(&book_path(book.id)).into_response()),
        Err(err) => {
            warn!(error = %err, "failed to create book");
            if let Some(name) = &stored_cover {
                state.cover_store.delete(name).await;
            }
            render_new_form(&state, form, true).await
        }
    }
}

#[tracing::instrument(skip(state))]
pub(crate) async fn book_detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, StatusCode> {
    let Some(id) = parse_book_id(&id) else {
        return Ok(Redirect::to("/").into_response());
    };

    match state.book_repo.get_with_author(id).await {
        Ok(enriched) => {
            let template = BookDetailTemplate {
                nav_active: "books",
                version: crate::VERSION,
                book: BookDetailView::from_domain(enriched),
            };
            render_html(template).map(IntoResponse::into_response)
        }
        Err(RepositoryError::NotFound) => Ok(Redirect::to("/").into_response()),
        Err(err) => {
            warn!(error = %err, "book lookup failed");
            Ok(Redirect::to("/").into_response())
        }
    }
}

#[tracing::instrument(skip(state))]
pub(crate) async fn book_edit_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, StatusCode> {
    let Some(id) = parse_book_id(&id) else {
        return Ok(Redirect::to("/").into_response());
    };

    match state.book_repo.get(id).await {
        Ok(book) => render_edit_form(&state, id, BookFormView::from_domain(&book), false).await,
        Err(RepositoryError::NotFound) => Ok(Redirect::to("/").into_response()),
        Err(err) => {
            warn!(error = %err, "book lookup failed");
            Ok(Redirect::to("/").into_response())
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, StatusCode> {
    let Some(id) = parse_book_id(&id) else {
        return Ok(Redirect::to("/").into_response());
    };

    let mut submission = read_submission(multipart).await?;
    let form = submission.form_view();
    let cover = submission.cover.take();

    let stored_cover = match cover {
        Some(upload) => match state.cover_store.store(upload).await {
            Ok(name) => name,
            Err(err) => {
                warn!(error = %err, "failed to store cover upload");
                return render_edit_form(&state, id, form, true).await;
            }
        },
        None => None,
    };

    let Some(parsed) = parse_submission(&submission) else {
        if let Some(name) = &stored_cover {
            state.cover_store.delete(name).await;
        }
        return render_edit_form(&state, id, form, true).await;
    };

    let changes = UpdateBook {
        title: parsed.title,
        author_id: parsed.author_id,
        publish_date: parsed.publish_date,
        page_count: parsed.page_count,
        // None preserves the stored cover reference
        cover_image_name: stored_cover.clone(),
        description: parsed.description,
    };

    match state.book_repo.update(id, changes).await {
        Ok(updated) => {
            // The displaced file is unreferenced once the write commits.
            if let Some(old) = updated.replaced_cover {
                state.cover_store.delete(&old).await;
            }
            Ok(Redirect::to(&book_path(id)).into_response())
        }
        Err(RepositoryError::NotFound) => {
            if let Some(name) = &stored_cover {
                state.cover_store.delete(name).await;
            }
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            warn!(error = %err, "failed to update book");
            // Compensate with the file written in this request, never the
            // reference held by the persisted record.
            if let Some(name) = &stored_cover {
                state.cover_store.delete(name).await;
            }
            render_edit_form(&state, id, form, true).await
        }
    }
}

#[tracing::instrument(skip(state))]
pub(crate) async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, StatusCode> {
    let Some(id) = parse_book_id(&id) else {
        return Ok(Redirect::to("/").into_response());
    };

    match state.book_repo.delete(id).await {
        Ok(book) => {
            if let Some(name) = book.cover_image_name {
                state.cover_store.delete(&name).await;
            }
            Ok(Redirect::to("/books").into_response())
        }
        Err(RepositoryError::NotFound) => Ok(Redirect::to("/").into_response()),
        Err(err) => {
            warn!(error = %err, "failed to delete book");
            Ok(Redirect::to("/").into_response())
        }
    }
}

// ── form rendering ──

async fn render_new_form(
    state: &AppState,
    form: BookFormView,
    has_error: bool,
) -> Result<Response, StatusCode> {
    let Some(author_options) = load_author_options(state).await else {
        return Ok(Redirect::to("/books").into_response());
    };

    let template = BookNewTemplate {
        nav_active: "books",
        version: crate::VERSION,
        form,
        author_options,
        error_message: error_message(has_error, CREATE_ERROR),
    };
    render_html(template).map(IntoResponse::into_response)
}

async fn render_edit_form(
    state: &AppState,
    id: BookId,
    form: BookFormView,
    has_error: bool,
) -> Result<Response, StatusCode> {
    let Some(author_options) = load_author_options(state).await else {
        return Ok(Redirect::to("/books").into_response());
    };

    let template = BookEditTemplate {
        nav_active: "books",
        version: crate::VERSION,
        id: id.to_string(),
        form,
        author_options,
        error_message: error_message(has_error, UPDATE_ERROR),
    };
    render_html(template).map(IntoResponse::into_response)
}

async fn load_author_options(state: &AppState) -> Option<Vec<AuthorOptionView>> {
    match state.author_repo.list_all().await {
        Ok(authors) => Some(authors.into_iter().map(AuthorOptionView::from).collect()),
        Err(err) => {
            warn!(error = %err, "failed to load author list for book form");
            None
        }
    }
}

fn error_message(has_error: bool, message: &str) -> String {
    if has_error {
        message.to_string()
    } else {
        String::new()
    }
}

// ── submission parsing ──

/// Raw multipart submission: field values exactly as sent, plus the cover
/// file when one was attached.
#[derive(Debug, Default)]
struct BookSubmission {
    title: String,
    author: String,
    publish_date: String,
    page_count: String,
    description: String,
    cover: Option<CoverUpload>,
}

impl BookSubmission {
    fn form_view(&self) -> BookFormView {
        BookFormView {
            title: self.title.clone(),
            author_id: self.author.clone(),
            publish_date: self.publish_date.clone(),
            page_count: self.page_count.clone(),
            description: self.description.clone(),
        }
    }
}

async fn read_submission(mut multipart: Multipart) -> Result<BookSubmission, StatusCode> {
    let mut submission = BookSubmission::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "cover" {
            // Browsers submit an empty cover part when no file is chosen.
            let has_file = field.file_name().is_some_and(|f| !f.is_empty());
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|err| {
                warn!(error = %err, "failed to read cover upload");
                StatusCode::BAD_REQUEST
            })?;

            if has_file && !bytes.is_empty() {
                submission.cover = Some(CoverUpload::new(content_type, bytes.to_vec()));
            }
            continue;
        }

        let value = field.text().await.map_err(|err| {
            warn!(error = %err, "failed to read form field");
            StatusCode::BAD_REQUEST
        })?;

        match name.as_str() {
            "title" => submission.title = value,
            "author" => submission.author = value,
            "publishDate" => submission.publish_date = value,
            "pageCount" => submission.page_count = value,
            "description" => submission.description = value,
            _ => {}
        }
    }

    Ok(submission)
}

async fn next_field(
    multipart: &mut Multipart,
) -> Result<Option<axum::extract::multipart::Field<'_>>, StatusCode> {
    multipart.next_field().await.map_err(|err| {
        warn!(error = %err, "malformed multipart submission");
        StatusCode::BAD_REQUEST
    })
}

/// Typed field values; `None` means the submission cannot become a valid
/// book (missing title, bad date, negative page count, garbled author id).
#[derive(Debug)]
struct ParsedBook {
    title: String,
    author_id: Option<AuthorId>,
    publish_date: NaiveDate,
    page_count: i32,
    description: Option<String>,
}

fn parse_submission(submission: &BookSubmission) -> Option<ParsedBook> {
    let title = submission.title.trim();
    if title.is_empty() {
        return None;
    }

    let author_id = match submission.author.trim() {
        "" => None,
        raw => Some(raw.parse::<AuthorId>().ok()?),
    };

    let publish_date = NaiveDate::parse_from_str(submission.publish_date.trim(), "%Y-%m-%d").ok()?;

    let page_count = submission
        .page_count
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|&count| count >= 0)?;

    let description = Some(submission.description.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Some(ParsedBook {
        title: title.to_string(),
        author_id,
        publish_date,
        page_count,
        description,
    })
}

fn parse_book_id(raw: &str) -> Option<BookId> {
    raw.parse::<BookId>().ok()
}

fn build_filter(query: &BookSearchQuery) -> Option<BookFilter> {
    let published_before = parse_date_param(query.published_before.as_deref())?;
    let published_after = parse_date_param(query.published_after.as_deref())?;

    Some(
        BookFilter::unconstrained()
            .with_title(query.title.as_deref())
            .with_published_before(published_before)
            .with_published_after(published_after),
    )
}

/// Absent or empty parameters are no clause; a present but unparseable
/// date is a query failure, not a silently dropped clause.
fn parse_date_param(raw: Option<&str>) -> Option<Option<NaiveDate>> {
    match raw {
        None => Some(None),
        Some(value) if value.is_empty() => Some(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().map(Some),
    }
}
