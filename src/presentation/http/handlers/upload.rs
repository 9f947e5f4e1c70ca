use crate::{
    application::compare_faces::{dto::ComparisonResponse, use_case::CompareFacesError},
    domain::upload::{entity::FIRST_FILE_FIELD, errors::UploadError},
    presentation::http::{errors::AppError, multipart::read_upload_parts, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, OriginalUri, State, multipart::MultipartRejection},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};

pub const UPLOAD_FORM: &str = r#"<!doctype html>
<title>Are these the same picture?</title>
<h1>Upload pictures and see if they are the same person!</h1>
<form method="POST" enctype="multipart/form-data">
  <input type="file" name="file_1">
  <input type="file" name="file_2">
  <input type="submit" value="Upload">
</form>
"#;

pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// Form submission endpoint.
///
/// Invalid uploads, including bodies that are not multipart at all, are sent
/// back to the form with a 302; only a valid pair produces the JSON comparison
/// result.
pub async fn upload_images(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(%rejection, "No multipart upload");
            return Ok(redirect_back(
                &uri,
                &UploadError::MissingFile(FIRST_FILE_FIELD),
            ));
        }
    };

    let parts = match read_upload_parts(multipart).await {
        Ok(parts) => parts,
        Err(reason) => return Ok(redirect_back(&uri, &reason)),
    };

    match state.compare_faces.execute(parts).await {
        Ok(result) => Ok(Json(ComparisonResponse::from(result)).into_response()),
        Err(CompareFacesError::Invalid(reason)) => Ok(redirect_back(&uri, &reason)),
        Err(err) => Err(err.into()),
    }
}

fn redirect_back(uri: &Uri, reason: &UploadError) -> Response {
    tracing::debug!(%reason, "Invalid upload, redirecting to form");
    let location = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
