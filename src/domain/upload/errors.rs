use thiserror::Error;

/// Reasons an upload cannot be handed to the comparator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Missing file part '{0}'")]
    MissingFile(&'static str),
    #[error("File part '{0}' has an empty filename")]
    EmptyFilename(&'static str),
    #[error("File '{filename}' does not have an allowed image extension")]
    DisallowedExtension { field: &'static str, filename: String },
    #[error("Malformed multipart body: {0}")]
    MalformedMultipart(String),
    #[error("Upload exceeds the maximum allowed size")]
    PayloadTooLarge,
}
