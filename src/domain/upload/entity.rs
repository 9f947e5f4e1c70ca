use bytes::Bytes;

/// Multipart field carrying the first image.
pub const FIRST_FILE_FIELD: &str = "file_1";
/// Multipart field carrying the second image.
pub const SECOND_FILE_FIELD: &str = "file_2";

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// File parts as they arrived, before any validation.
///
/// A part only lands here if it was sent as a file (it carried a `filename`
/// parameter, possibly empty). Plain text fields with the same name are ignored.
#[derive(Debug, Clone, Default)]
pub struct UploadParts {
    pub file_1: Option<ImageUpload>,
    pub file_2: Option<ImageUpload>,
}

/// A validated pair of images, ready for comparison.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_1: ImageUpload,
    pub file_2: ImageUpload,
}
