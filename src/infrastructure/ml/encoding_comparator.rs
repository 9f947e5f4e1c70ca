use super::traits::{FaceComparator, FaceEncoder};
use crate::domain::comparison::{
    entity::{ComparisonResult, FaceEncoding},
    errors::{ComparisonError, EncoderError},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Compares two images by the first face the encoder reports in each.
///
/// When an image holds several faces only the first one counts. Which face is
/// first is whatever order the encoder backend returns, so results for
/// group photos depend on the backend.
pub struct EncodingComparator {
    encoder: Arc<dyn FaceEncoder>,
    tolerance: f32,
}

impl EncodingComparator {
    pub fn new(encoder: Arc<dyn FaceEncoder>, tolerance: f32) -> Self {
        Self { encoder, tolerance }
    }

    async fn encodings_for(
        &self,
        label: &'static str,
        image_data: &[u8],
    ) -> Result<Vec<FaceEncoding>, ComparisonError> {
        match self.encoder.encode(image_data).await {
            Ok(encodings) => {
                tracing::debug!(image = label, faces = encodings.len(), "Encoded image");
                Ok(encodings)
            }
            Err(EncoderError::UndecodableImage(reason)) => {
                tracing::warn!(image = label, %reason, "Image could not be decoded, treating as no face");
                Ok(Vec::new())
            }
            Err(EncoderError::Unavailable(reason)) => {
                Err(ComparisonError::EncoderUnavailable(reason))
            }
        }
    }
}

#[async_trait]
impl FaceComparator for EncodingComparator {
    async fn compare(
        &self,
        image_1: &[u8],
        image_2: &[u8],
    ) -> Result<ComparisonResult, ComparisonError> {
        let known = self.encodings_for("file_1", image_1).await?;
        let unknown = self.encodings_for("file_2", image_2).await?;

        let result = match (known.first(), unknown.first()) {
            (Some(known), Some(unknown)) => {
                ComparisonResult::faces(known.matches(unknown, self.tolerance))
            }
            _ => ComparisonResult::no_face(),
        };

        Ok(result)
    }
}
