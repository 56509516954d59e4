use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::warn;

use crate::application::routes::render_html;
use crate::application::state::AppState;
use crate::domain::authors::NewAuthor;
use crate::presentation::web::templates::AuthorListTemplate;
use crate::presentation::web::views::AuthorView;

const CREATE_ERROR: &str = "Error creating author";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthorSearchQuery {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorForm {
    #[serde(default)]
    name: String,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn author_list_page(
    State(state): State<AppState>,
    Query(query): Query<AuthorSearchQuery>,
) -> Result<Response, StatusCode> {
    let search_name = query.name.unwrap_or_default();

    render_author_list(&state, search_name, String::new(), false).await
}

#[tracing::instrument(skip(state))]
pub(crate) async fn create_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> Result<Response, StatusCode> {
    if form.name.trim().is_empty() {
        return render_author_list(&state, String::new(), form.name, true).await;
    }

    match state.author_repo.insert(NewAuthor::new(form.name.clone())).await {
        Ok(_) => Ok(Redirect::to("/authors").into_response()),
        Err(err) => {
            warn!(error = %err, "failed to create author");
            render_author_list(&state, String::new(), form.name, true).await
        }
    }
}

async fn render_author_list(
    state: &AppState,
    search_name: String,
    form_name: String,
    has_error: bool,
) -> Result<Response, StatusCode> {
    let needle = Some(search_name.as_str()).filter(|n| !n.is_empty());

    match state.author_repo.list(needle).await {
        Ok(authors) => {
            let template = AuthorListTemplate {
                nav_active: "authors",
                version: crate::VERSION,
                authors: authors.into_iter().map(AuthorView::from).collect(),
                search_name,
                form_name,
                error_message: if has_error {
                    CREATE_ERROR.to_string()
                } else {
                    String::new()
                },
            };
            render_html(template).map(IntoResponse::into_response)
        }
        Err(err) => {
            warn!(error = %err, "author listing failed");
            Ok(Redirect::to("/").into_response())
        }
    }
}
