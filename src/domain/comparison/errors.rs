use thiserror::Error;

/// Failures reported by a face encoder backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    /// The bytes are not an image the backend can read.
    #[error("Undecodable image: {0}")]
    UndecodableImage(String),
    /// The backend could not be reached or answered with an error.
    #[error("Face encoder unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    #[error("Face encoder unavailable: {0}")]
    EncoderUnavailable(String),
}
