use crate::{
    application::compare_faces::dto::ComparisonLimits,
    domain::{
        comparison::{entity::ComparisonResult, errors::ComparisonError},
        upload::{entity::UploadParts, errors::UploadError, policy::UploadPolicy},
    },
    infrastructure::ml::traits::FaceComparator,
};
use sha2::{Digest, Sha256};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum CompareFacesError {
    #[error(transparent)]
    Invalid(#[from] UploadError),
    #[error("Comparison capacity exhausted")]
    Busy,
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

/// Validates an uploaded image pair and runs it through the face comparator.
///
/// Comparison is CPU or network bound, so at most `max_concurrent` run at
/// once. A request that cannot get a slot within `queue_timeout` fails with
/// [`CompareFacesError::Busy`] instead of queueing forever.
pub struct CompareFacesUseCase {
    policy: Arc<UploadPolicy>,
    comparator: Arc<dyn FaceComparator>,
    permits: Semaphore,
    queue_timeout: Duration,
}

impl CompareFacesUseCase {
    pub fn new(
        policy: Arc<UploadPolicy>,
        comparator: Arc<dyn FaceComparator>,
        limits: ComparisonLimits,
    ) -> Self {
        info!(
            max_concurrent = limits.max_concurrent,
            allowed_extensions = ?policy.allowed_extensions(),
            "Initializing CompareFacesUseCase"
        );
        Self {
            policy,
            comparator,
            permits: Semaphore::new(limits.max_concurrent.max(1)),
            queue_timeout: limits.queue_timeout,
        }
    }

    #[instrument(skip(self, parts))]
    pub async fn execute(&self, parts: UploadParts) -> Result<ComparisonResult, CompareFacesError> {
        let request = self.policy.validate(parts).map_err(|e| {
            debug!(reason = %e, "Upload rejected");
            e
        })?;

        let _permit = match tokio::time::timeout(self.queue_timeout, self.permits.acquire()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) | Err(_) => {
                warn!("No comparison slot available within {:?}", self.queue_timeout);
                return Err(CompareFacesError::Busy);
            }
        };

        debug!(
            file_1 = %request.file_1.filename,
            file_1_digest = %fingerprint(&request.file_1.data),
            file_2 = %request.file_2.filename,
            file_2_digest = %fingerprint(&request.file_2.data),
            "Comparing uploaded images"
        );

        let result = self
            .comparator
            .compare(&request.file_1.data, &request.file_2.data)
            .await?;

        info!(
            faces_found = result.face_found,
            is_same_person = result.is_same_person,
            "Comparison finished"
        );
        Ok(result)
    }
}

/// First 16 hex chars of the SHA-256 of `data`, for log correlation only.
fn fingerprint(data: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(data));
    digest[..16].to_string()
}
