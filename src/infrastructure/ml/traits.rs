use crate::domain::comparison::{
    entity::{ComparisonResult, FaceEncoding},
    errors::{ComparisonError, EncoderError},
};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FaceEncoder: Send + Sync {
    /// Encode every face found in the image, in the order the backend reports them.
    async fn encode(&self, image_data: &[u8]) -> Result<Vec<FaceEncoding>, EncoderError>;

    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

#[async_trait]
pub trait FaceComparator: Send + Sync {
    /// Decide whether both images contain a face and whether the first faces match.
    async fn compare(
        &self,
        image_1: &[u8],
        image_2: &[u8],
    ) -> Result<ComparisonResult, ComparisonError>;
}
