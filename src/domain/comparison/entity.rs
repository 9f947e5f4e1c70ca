use serde::{Deserialize, Serialize};

/// Default Euclidean distance at or below which two encodings are the same person.
pub const DEFAULT_MATCH_TOLERANCE: f32 = 0.6;

/// Fixed-length feature vector describing one detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceEncoding {
    pub values: Vec<f32>,
}

impl FaceEncoding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn euclidean_distance(&self, other: &FaceEncoding) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }

    /// Encodings of different dimensionality come from different models and
    /// never match.
    pub fn matches(&self, other: &FaceEncoding, tolerance: f32) -> bool {
        self.values.len() == other.values.len() && self.euclidean_distance(other) <= tolerance
    }
}

/// Outcome of comparing two images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComparisonResult {
    /// Both images yielded at least one face.
    pub face_found: bool,
    /// The first face of each image matched. Never true without `face_found`.
    pub is_same_person: bool,
}

impl ComparisonResult {
    pub fn no_face() -> Self {
        Self::default()
    }

    pub fn faces(is_same_person: bool) -> Self {
        Self {
            face_found: true,
            is_same_person,
        }
    }
}
