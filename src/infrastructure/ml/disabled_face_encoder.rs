use super::traits::FaceEncoder;
use crate::domain::comparison::{entity::FaceEncoding, errors::EncoderError};
use async_trait::async_trait;

/// Stand-in used when no encoder endpoint is configured. Every image reports
/// zero faces, so every comparison answers `face_found: false`.
pub struct DisabledFaceEncoder;

impl DisabledFaceEncoder {
    pub fn new() -> Self {
        tracing::warn!(
            "FACE_ENCODER_URL is not set. Face encoding is disabled and no faces will be found."
        );
        Self
    }
}

impl Default for DisabledFaceEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FaceEncoder for DisabledFaceEncoder {
    async fn encode(&self, _image_data: &[u8]) -> Result<Vec<FaceEncoding>, EncoderError> {
        Ok(Vec::new())
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
