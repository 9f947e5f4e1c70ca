use crate::{
    application::compare_faces::dto::ComparisonResponse,
    presentation::http::{errors::AppError, multipart::read_upload_parts, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};

/// JSON API variant of the form endpoint: every rejection carries a status
/// code and an `error` reason instead of a redirect.
pub async fn compare_images(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let parts = read_upload_parts(multipart).await?;
    let result = state.compare_faces.execute(parts).await?;

    Ok(Json(result.into()))
}
