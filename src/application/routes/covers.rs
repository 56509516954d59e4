use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::state::AppState;
use crate::domain::CoverStoreError;
use crate::domain::covers::content_type_for_file;

#[tracing::instrument(skip(state))]
pub(crate) async fn cover_image(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, StatusCode> {
    match state.cover_store.read(&file_name).await {
        Ok(bytes) => Ok((
            [
                ("content-type", content_type_for_file(&file_name)),
                ("cache-control", "public, max-age=604800"),
            ],
            bytes,
        )
            .into_response()),
        Err(CoverStoreError::NotFound | CoverStoreError::InvalidFileName) => {
            Err(StatusCode::NOT_FOUND)
        }
        Err(err) => {
            error!(error = %err, file = %file_name, "failed to read cover image");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
