use crate::{application::compare_faces::use_case::CompareFacesUseCase, config::Config};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub compare_faces: Arc<CompareFacesUseCase>,
    /// Name of the face encoder backend, reported by `/health`.
    pub encoder_backend: &'static str,
}
