use crate::domain::upload::{
    entity::{FIRST_FILE_FIELD, ImageUpload, SECOND_FILE_FIELD, UploadParts},
    errors::UploadError,
};
use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};

/// Collects the two image parts from a multipart body.
///
/// Only parts sent as files (with a `filename` parameter) count. When a field
/// name repeats, the first file wins.
pub async fn read_upload_parts(mut multipart: Multipart) -> Result<UploadParts, UploadError> {
    let mut parts = UploadParts::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let slot = match field.name() {
            Some(FIRST_FILE_FIELD) => &mut parts.file_1,
            Some(SECOND_FILE_FIELD) => &mut parts.file_2,
            _ => continue,
        };
        if slot.is_some() {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let data = field.bytes().await.map_err(multipart_error)?;
        *slot = Some(ImageUpload { filename, data });
    }

    Ok(parts)
}

fn multipart_error(err: MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::PayloadTooLarge
    } else {
        UploadError::MalformedMultipart(err.body_text())
    }
}
