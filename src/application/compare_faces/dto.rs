use crate::domain::comparison::entity::ComparisonResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JSON body returned for a completed comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub faces_found_in_images: bool,
    pub is_same_person: bool,
}

impl From<ComparisonResult> for ComparisonResponse {
    fn from(result: ComparisonResult) -> Self {
        Self {
            faces_found_in_images: result.face_found,
            is_same_person: result.face_found && result.is_same_person,
        }
    }
}

/// Bounds on how much comparison work runs at once.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonLimits {
    pub max_concurrent: usize,
    pub queue_timeout: Duration,
}
